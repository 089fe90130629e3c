//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod comment_service;
pub mod feed_service;
pub mod note_service;
pub mod thread;
