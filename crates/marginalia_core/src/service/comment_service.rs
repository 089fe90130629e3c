//! Comment use-case service: reply composition and per-note thread reads.
//!
//! # Responsibility
//! - Validate submitted content before delegating to the comment store.
//! - Provide the threaded read path the presentation layer renders from.
//!
//! # Invariants
//! - A blank submission is rejected here without touching the store.
//! - Depth and identity assignment stay inside the store; this layer never
//!   computes or overrides them.
//! - A successfully posted comment is visible to the next thread or feed
//!   query with no settling delay.

use crate::model::comment::{Comment, CommentId};
use crate::model::note::NoteId;
use crate::repo::comment_repo::{CommentRepoError, CommentRepository};
use crate::service::thread::build_thread;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from comment use-case operations.
#[derive(Debug)]
pub enum CommentServiceError {
    /// Submitted body is blank after trimming.
    EmptyBody,
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Referenced parent comment does not exist.
    ParentNotFound(CommentId),
    /// Referenced parent comment belongs to a different note.
    ParentNoteMismatch {
        parent_uuid: CommentId,
        parent_note: NoteId,
        note_slug: NoteId,
    },
    /// Storage-layer failure.
    Repo(CommentRepoError),
}

impl Display for CommentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBody => write!(f, "comment body must not be blank"),
            Self::NoteNotFound(slug) => write!(f, "note not found: {slug}"),
            Self::ParentNotFound(uuid) => write!(f, "parent comment not found: {uuid}"),
            Self::ParentNoteMismatch {
                parent_uuid,
                parent_note,
                note_slug,
            } => write!(
                f,
                "parent comment {parent_uuid} belongs to note `{parent_note}`, not `{note_slug}`"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommentServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CommentRepoError> for CommentServiceError {
    fn from(value: CommentRepoError) -> Self {
        match value {
            CommentRepoError::EmptyBody => Self::EmptyBody,
            CommentRepoError::NoteNotFound(slug) => Self::NoteNotFound(slug),
            CommentRepoError::ParentNotFound(uuid) => Self::ParentNotFound(uuid),
            CommentRepoError::ParentNoteMismatch {
                parent_uuid,
                parent_note,
                note_slug,
            } => Self::ParentNoteMismatch {
                parent_uuid,
                parent_note,
                note_slug,
            },
            other => Self::Repo(other),
        }
    }
}

/// Comment service facade over the comment store.
pub struct CommentService<R: CommentRepository> {
    repo: R,
}

impl<R: CommentRepository> CommentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Submits one comment, top-level (`parent_uuid = None`) or reply.
    ///
    /// # Contract
    /// - Blank bodies are rejected before any store access.
    /// - The store assigns id, timestamp and depth; the returned record is
    ///   immediately visible to subsequent queries.
    pub fn post_comment(
        &self,
        note_slug: &str,
        parent_uuid: Option<CommentId>,
        body: &str,
    ) -> Result<Comment, CommentServiceError> {
        if body.trim().is_empty() {
            return Err(CommentServiceError::EmptyBody);
        }

        let comment = self.repo.append_comment(note_slug, parent_uuid, body)?;
        info!(
            "event=comment_post module=service status=ok note={} depth={}",
            comment.note_slug, comment.depth
        );
        Ok(comment)
    }

    /// Returns one note's comments in threaded display order.
    ///
    /// Unknown or uncommented notes yield an empty thread.
    pub fn thread_for_note(&self, note_slug: &str) -> Result<Vec<Comment>, CommentServiceError> {
        let comments = self.repo.comments_for_note(note_slug)?;
        Ok(build_thread(&comments))
    }
}
