//! Note catalog repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide lookup and seed-insert APIs over the `notes` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - The catalog is seeded once and read-only afterwards; there is no
//!   update or delete path.
//! - List order is deterministic: `created_at DESC, slug ASC`.

use crate::db::DbError;
use crate::model::note::{Note, NoteKind};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const NOTE_SELECT_SQL: &str = "SELECT
    slug,
    title,
    author,
    kind,
    body,
    created_at
FROM notes";

/// Result type shared by the read-only catalog repositories.
pub type CatalogRepoResult<T> = Result<T, CatalogRepoError>;

/// Errors from catalog (notes/experiments) repository operations.
#[derive(Debug)]
pub enum CatalogRepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Seed insert collided with an existing slug.
    DuplicateSlug(String),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for CatalogRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateSlug(slug) => write!(f, "catalog slug already exists: {slug}"),
            Self::InvalidData(message) => write!(f, "invalid persisted catalog data: {message}"),
        }
    }
}

impl Error for CatalogRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::DuplicateSlug(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for CatalogRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for CatalogRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the reading-note catalog.
pub trait NoteRepository {
    /// Inserts one catalog entry. Seed path only.
    fn insert_note(&self, note: &Note) -> CatalogRepoResult<()>;
    /// Loads one note by slug.
    fn get_note(&self, slug: &str) -> CatalogRepoResult<Option<Note>>;
    /// Lists the whole catalog, newest first.
    fn list_notes(&self) -> CatalogRepoResult<Vec<Note>>;
}

/// SQLite-backed note catalog repository.
pub struct SqliteNoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn insert_note(&self, note: &Note) -> CatalogRepoResult<()> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM notes WHERE slug = ?1;",
                params![note.slug.as_str()],
                |_| Ok(()),
            )
            .optional()?;
        if exists.is_some() {
            return Err(CatalogRepoError::DuplicateSlug(note.slug.clone()));
        }

        self.conn.execute(
            "INSERT INTO notes (slug, title, author, kind, body, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                note.slug.as_str(),
                note.title.as_str(),
                note.author.as_str(),
                note_kind_to_db(note.kind),
                note.body.as_str(),
                note.created_at,
            ],
        )?;

        Ok(())
    }

    fn get_note(&self, slug: &str) -> CatalogRepoResult<Option<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} WHERE slug = ?1;"))?;

        let mut rows = stmt.query(params![slug])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_note_row(row)?));
        }

        Ok(None)
    }

    fn list_notes(&self) -> CatalogRepoResult<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "{NOTE_SELECT_SQL} ORDER BY created_at DESC, slug ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }

        Ok(notes)
    }
}

fn parse_note_row(row: &Row<'_>) -> CatalogRepoResult<Note> {
    let kind_text: String = row.get("kind")?;
    let kind = parse_note_kind(&kind_text).ok_or_else(|| {
        CatalogRepoError::InvalidData(format!("invalid note kind `{kind_text}` in notes.kind"))
    })?;

    Ok(Note {
        slug: row.get("slug")?,
        title: row.get("title")?,
        author: row.get("author")?,
        kind,
        body: row.get("body")?,
        created_at: row.get("created_at")?,
    })
}

fn note_kind_to_db(kind: NoteKind) -> &'static str {
    match kind {
        NoteKind::Book => "book",
        NoteKind::Article => "article",
    }
}

fn parse_note_kind(value: &str) -> Option<NoteKind> {
    match value {
        "book" => Some(NoteKind::Book),
        "article" => Some(NoteKind::Article),
        _ => None,
    }
}
