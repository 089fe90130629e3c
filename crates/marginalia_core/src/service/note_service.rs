//! Note catalog use-case service.
//!
//! # Responsibility
//! - Provide the read surface of the note catalog (single lookup + listing).
//! - Derive plain-text previews from markdown bodies for list display.
//!
//! # Invariants
//! - The catalog is read-only here; all writes happen during seeding.
//! - List order is `created_at DESC, slug ASC`.

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{CatalogRepoError, NoteRepository};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const PREVIEW_MAX_CHARS: usize = 160;

/// Service error for note catalog use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Target note does not exist.
    NoteNotFound(NoteId),
    /// Persistence-layer failure.
    Repo(CatalogRepoError),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(slug) => write!(f, "note not found: {slug}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NoteNotFound(_) => None,
        }
    }
}

impl From<CatalogRepoError> for NoteServiceError {
    fn from(value: CatalogRepoError) -> Self {
        Self::Repo(value)
    }
}

/// Note catalog facade over the repository implementation.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets one note by slug, failing with `NoteNotFound` when absent.
    pub fn get_note(&self, slug: &str) -> Result<Note, NoteServiceError> {
        self.repo
            .get_note(slug)?
            .ok_or_else(|| NoteServiceError::NoteNotFound(slug.to_string()))
    }

    /// Lists the whole catalog, newest first.
    pub fn list_notes(&self) -> Result<Vec<Note>, NoteServiceError> {
        Ok(self.repo.list_notes()?)
    }
}

/// Derives a plain-text preview from a markdown note body.
///
/// Rules: images removed, links reduced to their text, markdown symbols
/// stripped, whitespace collapsed, first [`PREVIEW_MAX_CHARS`] chars kept.
pub fn derive_note_preview(body: &str) -> String {
    let without_images = MARKDOWN_IMAGE_RE.replace_all(body, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    normalized.trim().chars().take(PREVIEW_MAX_CHARS).collect()
}
