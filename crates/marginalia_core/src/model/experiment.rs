//! Experiment catalog model.
//!
//! Experiments are the site's "what I'm currently trying" list. They are
//! read-only to this core, like the note catalog, and carry no discussion.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperimentStatus {
    /// Currently running.
    Active,
    /// Finished, results absorbed.
    Completed,
    /// On hold.
    Paused,
}

/// One experiment entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    /// Stable slug.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Short description of what is being tested.
    pub description: String,
    /// Current lifecycle state.
    pub status: ExperimentStatus,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}
