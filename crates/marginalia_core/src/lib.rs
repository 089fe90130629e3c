//! Core domain logic for the marginalia reading-notes discussion system.
//! This crate is the single source of truth for comment-thread invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::comment::{Comment, CommentId, MAX_DEPTH};
pub use model::experiment::{Experiment, ExperimentStatus};
pub use model::note::{Note, NoteId, NoteKind};
pub use repo::comment_repo::{
    CommentRepoError, CommentRepoResult, CommentRepository, NoteHeader, RecentCommentRow,
    SqliteCommentRepository,
};
pub use repo::experiment_repo::{ExperimentRepository, SqliteExperimentRepository};
pub use repo::note_repo::{
    CatalogRepoError, CatalogRepoResult, NoteRepository, SqliteNoteRepository,
};
pub use seed::{seed_sample_content, SeedError};
pub use service::comment_service::{CommentService, CommentServiceError};
pub use service::feed_service::{FeedEntry, FeedService, DEFAULT_FEED_LIMIT, UNKNOWN_NOTE_LABEL};
pub use service::note_service::{derive_note_preview, NoteService, NoteServiceError};
pub use service::thread::build_thread;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
