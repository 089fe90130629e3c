//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - The comment store's `append_comment` is the only write path for
//!   comments; catalog inserts happen only during seeding.
//! - Repository APIs return semantic errors (`NoteNotFound`,
//!   `ParentNotFound`) in addition to DB transport errors.

pub mod comment_repo;
pub mod experiment_repo;
pub mod note_repo;
