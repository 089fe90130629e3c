use marginalia_core::db::open_db_in_memory;
use marginalia_core::{
    derive_note_preview, seed_sample_content, CommentService, ExperimentRepository,
    ExperimentStatus, FeedService, NoteService, SqliteCommentRepository,
    SqliteExperimentRepository, SqliteNoteRepository,
};

#[test]
fn seed_loads_catalog_newest_first() {
    let conn = open_db_in_memory().unwrap();
    seed_sample_content(&conn).unwrap();

    let notes = NoteService::new(SqliteNoteRepository::new(&conn));
    let listed = notes.list_notes().unwrap();
    let slugs: Vec<&str> = listed.iter().map(|note| note.slug.as_str()).collect();
    assert_eq!(slugs, vec!["atomic-habits", "mom-test", "zero-to-one"]);

    let note = notes.get_note("mom-test").unwrap();
    assert_eq!(note.display_title(), "The Mom Test by Rob Fitzpatrick");
    assert!(!derive_note_preview(&note.body).is_empty());
}

#[test]
fn seeded_discussion_reproduces_sample_thread_shape() {
    let conn = open_db_in_memory().unwrap();
    seed_sample_content(&conn).unwrap();

    let service = CommentService::new(SqliteCommentRepository::new(&conn));
    let thread = service.thread_for_note("atomic-habits").unwrap();

    // Three-deep chain first, then the later top-level comment.
    assert_eq!(
        thread.iter().map(|comment| comment.depth).collect::<Vec<_>>(),
        vec![1, 2, 3, 1]
    );
    assert!(thread[1].parent_uuid == Some(thread[0].uuid));
    assert!(thread[2].parent_uuid == Some(thread[1].uuid));
    assert!(thread[3].is_top_level());
}

#[test]
fn seeded_feed_spans_all_notes() {
    let conn = open_db_in_memory().unwrap();
    seed_sample_content(&conn).unwrap();

    let feed = FeedService::new(SqliteCommentRepository::new(&conn));
    let entries = feed.recent_comments(None).unwrap();

    assert_eq!(entries.len(), 10);
    // Replay order is oldest-first, so the newest entries come from the
    // atomic-habits discussion seeded last.
    assert_eq!(entries[0].note_title, "Atomic Habits by James Clear");
    let times: Vec<i64> = entries
        .iter()
        .map(|entry| entry.comment.created_at)
        .collect();
    assert!(times.windows(2).all(|pair| pair[0] > pair[1]));
}

#[test]
fn seed_loads_experiments_with_statuses() {
    let conn = open_db_in_memory().unwrap();
    seed_sample_content(&conn).unwrap();

    let experiments = SqliteExperimentRepository::new(&conn)
        .list_experiments()
        .unwrap();
    assert_eq!(experiments.len(), 3);
    assert_eq!(experiments[0].slug, "exp-sales-funnel");
    assert_eq!(experiments[0].status, ExperimentStatus::Active);
    assert_eq!(experiments[2].status, ExperimentStatus::Completed);
}

#[test]
fn seeding_twice_fails_on_duplicate_slug() {
    let conn = open_db_in_memory().unwrap();
    seed_sample_content(&conn).unwrap();
    assert!(seed_sample_content(&conn).is_err());
}
