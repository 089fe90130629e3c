//! Comment domain model.
//!
//! # Responsibility
//! - Define the flat comment record the thread builder reorders.
//! - Own the nesting-depth arithmetic, including the flattening ceiling.
//!
//! # Invariants
//! - `uuid` and `created_at` are assigned by the store, never by callers.
//! - `depth == 1` exactly when `parent_uuid` is `None`.
//! - `depth` never exceeds `MAX_DEPTH`; deeper chains keep filing at the cap.

use crate::model::note::NoteId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a comment, assigned at write time.
pub type CommentId = Uuid;

/// Maximum nesting depth. Replies below this level collapse to the same
/// indentation; true ancestry beyond it requires walking `parent_uuid`.
pub const MAX_DEPTH: u8 = 5;

/// One comment in a note's discussion, stored flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Store-assigned stable id.
    pub uuid: CommentId,
    /// Owning note. Always references an existing catalog entry.
    #[serde(rename = "noteId")]
    pub note_slug: NoteId,
    /// Parent comment on the same note. `None` means top-level.
    #[serde(rename = "parentId")]
    pub parent_uuid: Option<CommentId>,
    /// Submitted text, non-blank after trimming.
    pub body: String,
    /// Unix epoch milliseconds, strictly increasing per store.
    pub created_at: i64,
    /// 1-based nesting level, capped at [`MAX_DEPTH`].
    pub depth: u8,
}

impl Comment {
    /// Returns whether this comment starts a thread rather than replying.
    pub fn is_top_level(&self) -> bool {
        self.parent_uuid.is_none()
    }

    /// Depth assigned to a reply under a parent at `parent_depth`.
    ///
    /// Chains longer than [`MAX_DEPTH`] keep filing at the cap instead of
    /// incrementing unboundedly.
    pub fn child_depth(parent_depth: u8) -> u8 {
        parent_depth.saturating_add(1).min(MAX_DEPTH)
    }
}
