//! Cross-note recent-activity feed.
//!
//! # Responsibility
//! - Produce the bounded, newest-first feed of comments across all notes,
//!   each annotated with its owning note's display title.
//!
//! # Invariants
//! - Entries are sorted by descending creation time; the store's strictly
//!   monotonic timestamps make the order total.
//! - An unresolvable note never drops or fails an entry; it is labeled with
//!   the `Unknown` sentinel instead.

use crate::model::comment::Comment;
use crate::repo::comment_repo::{CommentRepoError, CommentRepository};
use log::warn;

/// Feed size used when callers pass no explicit limit.
pub const DEFAULT_FEED_LIMIT: u32 = 10;

/// Sentinel label for feed rows whose note cannot be resolved.
pub const UNKNOWN_NOTE_LABEL: &str = "Unknown";

/// One activity feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// The comment itself.
    pub comment: Comment,
    /// `"{title} by {author}"` of the owning note, or the sentinel label.
    pub note_title: String,
}

/// Feed service facade over the comment store.
pub struct FeedService<R: CommentRepository> {
    repo: R,
}

impl<R: CommentRepository> FeedService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the globally newest comments, newest first.
    ///
    /// # Contract
    /// - `limit = None` applies [`DEFAULT_FEED_LIMIT`].
    /// - `limit = Some(0)` yields an empty feed.
    /// - A limit above the total comment count yields everything.
    pub fn recent_comments(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<FeedEntry>, CommentRepoError> {
        let limit = limit.unwrap_or(DEFAULT_FEED_LIMIT);
        let rows = self.repo.recent_comments(limit)?;

        let entries = rows
            .into_iter()
            .map(|row| {
                let note_title = match row.note_header {
                    Some(header) => header.display_title(),
                    None => {
                        warn!(
                            "event=feed_orphan module=service status=degraded note={}",
                            row.comment.note_slug
                        );
                        UNKNOWN_NOTE_LABEL.to_string()
                    }
                };
                FeedEntry {
                    comment: row.comment,
                    note_title,
                }
            })
            .collect();

        Ok(entries)
    }
}
