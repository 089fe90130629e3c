//! Domain model for the reading-notes discussion core.
//!
//! # Responsibility
//! - Define the canonical records shared by repositories and services.
//! - Keep one shape per aggregate: note catalog, comment, experiment.
//!
//! # Invariants
//! - Notes and experiments are identified by stable human slugs.
//! - Comments are identified by store-assigned UUIDs.
//! - Comment `depth` always stays inside `[1, MAX_DEPTH]`.

pub mod comment;
pub mod experiment;
pub mod note;
