use marginalia_core::db::open_db_in_memory;
use marginalia_core::{
    CommentRepository, FeedService, Note, NoteKind, NoteRepository, SqliteCommentRepository,
    SqliteNoteRepository, DEFAULT_FEED_LIMIT, UNKNOWN_NOTE_LABEL,
};
use rusqlite::{params, Connection};
use uuid::Uuid;

fn store_with_notes() -> Connection {
    let conn = open_db_in_memory().unwrap();
    let notes = SqliteNoteRepository::new(&conn);
    notes
        .insert_note(&Note::new(
            "atomic-habits",
            "Atomic Habits",
            "James Clear",
            NoteKind::Book,
            "systems over goals",
            1_000,
        ))
        .unwrap();
    notes
        .insert_note(&Note::new(
            "zero-to-one",
            "Zero to One",
            "Peter Thiel",
            NoteKind::Book,
            "monopoly through innovation",
            2_000,
        ))
        .unwrap();
    conn
}

fn set_created_at(conn: &Connection, uuid: Uuid, created_at: i64) {
    conn.execute(
        "UPDATE comments SET created_at = ?1 WHERE uuid = ?2;",
        params![created_at, uuid.to_string()],
    )
    .unwrap();
}

#[test]
fn feed_returns_newest_first_across_notes_with_display_titles() {
    let conn = store_with_notes();
    let repo = SqliteCommentRepository::new(&conn);

    let older = repo.append_comment("atomic-habits", None, "older").unwrap();
    let newest = repo.append_comment("zero-to-one", None, "newest").unwrap();
    let middle = repo.append_comment("atomic-habits", None, "middle").unwrap();
    set_created_at(&conn, older.uuid, 5);
    set_created_at(&conn, newest.uuid, 30);
    set_created_at(&conn, middle.uuid, 10);

    let feed = FeedService::new(SqliteCommentRepository::new(&conn));
    let entries = feed.recent_comments(None).unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].comment.uuid, newest.uuid);
    assert_eq!(entries[0].note_title, "Zero to One by Peter Thiel");
    assert_eq!(entries[1].comment.uuid, middle.uuid);
    assert_eq!(entries[1].note_title, "Atomic Habits by James Clear");
    assert_eq!(entries[2].comment.uuid, older.uuid);
    let times: Vec<i64> = entries
        .iter()
        .map(|entry| entry.comment.created_at)
        .collect();
    assert!(times.windows(2).all(|pair| pair[0] > pair[1]));
}

#[test]
fn feed_truncates_to_requested_limit() {
    let conn = store_with_notes();
    let repo = SqliteCommentRepository::new(&conn);

    let older = repo.append_comment("atomic-habits", None, "t5").unwrap();
    let newest = repo.append_comment("atomic-habits", None, "t30").unwrap();
    let middle = repo.append_comment("zero-to-one", None, "t10").unwrap();
    set_created_at(&conn, older.uuid, 5);
    set_created_at(&conn, newest.uuid, 30);
    set_created_at(&conn, middle.uuid, 10);

    let feed = FeedService::new(SqliteCommentRepository::new(&conn));
    let entries = feed.recent_comments(Some(2)).unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].comment.uuid, newest.uuid);
    assert_eq!(entries[1].comment.uuid, middle.uuid);
}

#[test]
fn feed_limit_zero_is_empty() {
    let conn = store_with_notes();
    SqliteCommentRepository::new(&conn)
        .append_comment("atomic-habits", None, "any")
        .unwrap();

    let feed = FeedService::new(SqliteCommentRepository::new(&conn));
    assert!(feed.recent_comments(Some(0)).unwrap().is_empty());
}

#[test]
fn feed_limit_above_total_returns_everything() {
    let conn = store_with_notes();
    let repo = SqliteCommentRepository::new(&conn);
    for index in 0..4 {
        repo.append_comment("zero-to-one", None, format!("c{index}").as_str())
            .unwrap();
    }

    let feed = FeedService::new(SqliteCommentRepository::new(&conn));
    let entries = feed.recent_comments(Some(100)).unwrap();
    assert_eq!(entries.len(), 4);
}

#[test]
fn default_limit_caps_large_feeds() {
    let conn = store_with_notes();
    let repo = SqliteCommentRepository::new(&conn);
    for index in 0..(DEFAULT_FEED_LIMIT + 5) {
        repo.append_comment("atomic-habits", None, format!("c{index}").as_str())
            .unwrap();
    }

    let feed = FeedService::new(SqliteCommentRepository::new(&conn));
    let entries = feed.recent_comments(None).unwrap();
    assert_eq!(entries.len(), DEFAULT_FEED_LIMIT as usize);
}

#[test]
fn unresolvable_note_degrades_to_unknown_label() {
    let conn = store_with_notes();
    let repo = SqliteCommentRepository::new(&conn);
    let stray = repo.append_comment("atomic-habits", None, "stray").unwrap();

    // Simulate the latent integrity violation the feed must tolerate: point
    // the stored row at a note that no longer resolves.
    conn.execute_batch("PRAGMA foreign_keys = OFF;").unwrap();
    conn.execute(
        "UPDATE comments SET note_slug = 'ghost-note' WHERE uuid = ?1;",
        params![stray.uuid.to_string()],
    )
    .unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();

    let feed = FeedService::new(SqliteCommentRepository::new(&conn));
    let entries = feed.recent_comments(None).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].comment.uuid, stray.uuid);
    assert_eq!(entries[0].note_title, UNKNOWN_NOTE_LABEL);
}
