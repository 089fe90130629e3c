//! Comment store contract and SQLite implementation.
//!
//! # Responsibility
//! - Own the canonical flat comment list and its single mutation entry point.
//! - Enforce referential integrity (owning note, same-note parent) and the
//!   depth rule at write time.
//! - Assign comment ids and creation timestamps; callers never supply them.
//!
//! # Invariants
//! - `append_comment` validates fully before inserting; a failed call leaves
//!   the store unchanged.
//! - Assigned timestamps are strictly increasing, so creation order is total.
//! - Comments are never edited or deleted.

use crate::db::DbError;
use crate::model::comment::{Comment, CommentId, MAX_DEPTH};
use crate::model::note::NoteId;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const COMMENT_SELECT_SQL: &str = "SELECT
    uuid,
    note_slug,
    parent_uuid,
    body,
    created_at,
    depth
FROM comments";

/// Result type used by comment store operations.
pub type CommentRepoResult<T> = Result<T, CommentRepoError>;

/// Errors from comment store operations.
#[derive(Debug)]
pub enum CommentRepoError {
    /// Submitted body is blank after trimming.
    EmptyBody,
    /// Owning note does not exist in the catalog.
    NoteNotFound(NoteId),
    /// Referenced parent comment does not exist.
    ParentNotFound(CommentId),
    /// Referenced parent comment belongs to a different note.
    ParentNoteMismatch {
        parent_uuid: CommentId,
        parent_note: NoteId,
        note_slug: NoteId,
    },
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl Display for CommentRepoError {
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
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted comment data: {message}"),
        }
    }
}

impl Error for CommentRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for CommentRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for CommentRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Note title/author pair attached to activity feed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteHeader {
    /// Note display title.
    pub title: String,
    /// Original work's author.
    pub author: String,
}

impl NoteHeader {
    /// Feed display label: `"{title} by {author}"`.
    pub fn display_title(&self) -> String {
        format!("{} by {}", self.title, self.author)
    }
}

/// One raw activity feed row: a comment plus its owning note's header.
///
/// The header is `None` when the note row cannot be resolved, which only
/// happens if referential integrity was violated elsewhere; the feed service
/// degrades such rows to a sentinel label instead of dropping them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentCommentRow {
    pub comment: Comment,
    pub note_header: Option<NoteHeader>,
}

/// Repository interface for the comment store.
pub trait CommentRepository {
    /// Validates and appends one comment; the sole mutation entry point.
    ///
    /// # Contract
    /// - Blank `body` fails with [`CommentRepoError::EmptyBody`].
    /// - Unknown `note_slug` fails with [`CommentRepoError::NoteNotFound`].
    /// - Unknown `parent_uuid` fails with [`CommentRepoError::ParentNotFound`];
    ///   a parent on another note fails with
    ///   [`CommentRepoError::ParentNoteMismatch`].
    /// - On success the returned record carries a fresh uuid, a
    ///   store-assigned strictly-monotonic timestamp, and
    ///   `depth = min(parent.depth + 1, 5)` (1 for top-level).
    fn append_comment(
        &self,
        note_slug: &str,
        parent_uuid: Option<CommentId>,
        body: &str,
    ) -> CommentRepoResult<Comment>;

    /// Returns all comments of one note in storage order.
    ///
    /// Storage order is not display order; threading is the service's job.
    /// Unknown or uncommented notes yield an empty vec, never an error.
    fn comments_for_note(&self, note_slug: &str) -> CommentRepoResult<Vec<Comment>>;

    /// Returns the globally newest comments, newest first, with each owning
    /// note's header resolved when possible.
    fn recent_comments(&self, limit: u32) -> CommentRepoResult<Vec<RecentCommentRow>>;

    /// Returns the total number of stored comments.
    fn count_comments(&self) -> CommentRepoResult<u64>;
}

/// SQLite-backed comment store.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn append_comment(
        &self,
        note_slug: &str,
        parent_uuid: Option<CommentId>,
        body: &str,
    ) -> CommentRepoResult<Comment> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Err(CommentRepoError::EmptyBody);
        }

        let note_exists = self
            .conn
            .query_row(
                "SELECT 1 FROM notes WHERE slug = ?1;",
                params![note_slug],
                |_| Ok(()),
            )
            .optional()?;
        if note_exists.is_none() {
            return Err(CommentRepoError::NoteNotFound(note_slug.to_string()));
        }

        let depth = match parent_uuid {
            None => 1,
            Some(parent) => {
                let parent_row = self
                    .conn
                    .query_row(
                        "SELECT note_slug, depth FROM comments WHERE uuid = ?1;",
                        params![parent.to_string()],
                        |row| {
                            Ok((row.get::<_, String>("note_slug")?, row.get::<_, i64>("depth")?))
                        },
                    )
                    .optional()?;

                let (parent_note, parent_depth) =
                    parent_row.ok_or(CommentRepoError::ParentNotFound(parent))?;
                if parent_note != note_slug {
                    return Err(CommentRepoError::ParentNoteMismatch {
                        parent_uuid: parent,
                        parent_note,
                        note_slug: note_slug.to_string(),
                    });
                }
                Comment::child_depth(parse_depth(parent_depth)?)
            }
        };

        let comment = Comment {
            uuid: Uuid::new_v4(),
            note_slug: note_slug.to_string(),
            parent_uuid,
            body: trimmed.to_string(),
            created_at: self.next_created_at()?,
            depth,
        };

        self.conn.execute(
            "INSERT INTO comments (uuid, note_slug, parent_uuid, body, created_at, depth)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                comment.uuid.to_string(),
                comment.note_slug.as_str(),
                comment.parent_uuid.map(|uuid| uuid.to_string()),
                comment.body.as_str(),
                comment.created_at,
                i64::from(comment.depth),
            ],
        )?;

        info!(
            "event=comment_append module=repo status=ok note={} depth={} top_level={}",
            comment.note_slug,
            comment.depth,
            comment.is_top_level()
        );

        Ok(comment)
    }

    fn comments_for_note(&self, note_slug: &str) -> CommentRepoResult<Vec<Comment>> {
        let mut stmt = self.conn.prepare(&format!(
            "{COMMENT_SELECT_SQL} WHERE note_slug = ?1 ORDER BY created_at ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query(params![note_slug])?;
        let mut comments = Vec::new();
        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }

        Ok(comments)
    }

    fn recent_comments(&self, limit: u32) -> CommentRepoResult<Vec<RecentCommentRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                c.uuid,
                c.note_slug,
                c.parent_uuid,
                c.body,
                c.created_at,
                c.depth,
                n.title,
                n.author
             FROM comments c
             LEFT JOIN notes n ON n.slug = c.note_slug
             ORDER BY c.created_at DESC, c.uuid ASC
             LIMIT ?1;",
        )?;

        let mut rows = stmt.query(params![i64::from(limit)])?;
        let mut feed = Vec::new();
        while let Some(row) = rows.next()? {
            let comment = parse_comment_row(row)?;
            let title: Option<String> = row.get("title")?;
            let author: Option<String> = row.get("author")?;
            let note_header = match (title, author) {
                (Some(title), Some(author)) => Some(NoteHeader { title, author }),
                _ => None,
            };
            feed.push(RecentCommentRow {
                comment,
                note_header,
            });
        }

        Ok(feed)
    }

    fn count_comments(&self) -> CommentRepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM comments;", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl SqliteCommentRepository<'_> {
    /// Picks the next creation timestamp: wall clock, bumped past the latest
    /// stored timestamp so assignment order stays strictly increasing even
    /// at sub-millisecond submission rates.
    fn next_created_at(&self) -> CommentRepoResult<i64> {
        let latest: Option<i64> =
            self.conn
                .query_row("SELECT MAX(created_at) FROM comments;", [], |row| {
                    row.get(0)
                })?;
        let now = now_epoch_ms();
        Ok(latest.map_or(now, |latest| now.max(latest + 1)))
    }
}

fn parse_comment_row(row: &Row<'_>) -> CommentRepoResult<Comment> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        CommentRepoError::InvalidData(format!("invalid uuid `{uuid_text}` in comments.uuid"))
    })?;

    let parent_uuid = match row.get::<_, Option<String>>("parent_uuid")? {
        Some(text) => Some(Uuid::parse_str(&text).map_err(|_| {
            CommentRepoError::InvalidData(format!(
                "invalid uuid `{text}` in comments.parent_uuid"
            ))
        })?),
        None => None,
    };

    Ok(Comment {
        uuid,
        note_slug: row.get("note_slug")?,
        parent_uuid,
        body: row.get("body")?,
        created_at: row.get("created_at")?,
        depth: parse_depth(row.get("depth")?)?,
    })
}

fn parse_depth(value: i64) -> CommentRepoResult<u8> {
    if (1..=i64::from(MAX_DEPTH)).contains(&value) {
        Ok(value as u8)
    } else {
        Err(CommentRepoError::InvalidData(format!(
            "invalid depth `{value}` in comments.depth"
        )))
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
