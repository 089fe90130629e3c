//! Reading-note catalog model.
//!
//! # Responsibility
//! - Define the discussable content item that comments attach to.
//!
//! # Invariants
//! - `slug` is stable and never reused for another note.
//! - Notes are immutable after seeding; the core defines no update path.

use serde::{Deserialize, Serialize};

/// Stable identifier for a reading note.
///
/// Human slugs (e.g. `atomic-habits`) rather than UUIDs, matching how the
/// catalog is linked to from the outside.
pub type NoteId = String;

/// Content kind of a reading note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    /// Full-length book summary.
    Book,
    /// Shorter article summary.
    Article,
}

/// One discussable reading note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable slug used for linking and comment ownership.
    pub slug: NoteId,
    /// Display title.
    pub title: String,
    /// Original work's author, shown next to the title.
    pub author: String,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: NoteKind,
    /// Markdown body of the summary.
    pub body: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Note {
    /// Creates a catalog entry with the provided stable slug.
    pub fn new(
        slug: impl Into<NoteId>,
        title: impl Into<String>,
        author: impl Into<String>,
        kind: NoteKind,
        body: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            author: author.into(),
            kind,
            body: body.into(),
            created_at,
        }
    }

    /// Display label used by the activity feed: `"{title} by {author}"`.
    pub fn display_title(&self) -> String {
        format!("{} by {}", self.title, self.author)
    }
}
