use marginalia_core::db::open_db_in_memory;
use marginalia_core::{
    CommentRepository, CommentService, Note, NoteKind, NoteRepository, SqliteCommentRepository,
    SqliteNoteRepository,
};
use rusqlite::{params, Connection};
use uuid::Uuid;

fn store_with_note(slug: &str) -> Connection {
    let conn = open_db_in_memory().unwrap();
    SqliteNoteRepository::new(&conn)
        .insert_note(&Note::new(
            slug,
            "Atomic Habits",
            "James Clear",
            NoteKind::Book,
            "systems over goals",
            1_000,
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
fn reply_emits_under_parent_before_later_top_level() {
    let conn = store_with_note("atomic-habits");
    let repo = SqliteCommentRepository::new(&conn);

    let a = repo.append_comment("atomic-habits", None, "A").unwrap();
    let b = repo
        .append_comment("atomic-habits", Some(a.uuid), "B")
        .unwrap();
    let c = repo.append_comment("atomic-habits", None, "C").unwrap();
    set_created_at(&conn, a.uuid, 10);
    set_created_at(&conn, b.uuid, 20);
    set_created_at(&conn, c.uuid, 15);

    let service = CommentService::new(SqliteCommentRepository::new(&conn));
    let thread = service.thread_for_note("atomic-habits").unwrap();

    assert_eq!(
        thread.iter().map(|comment| comment.uuid).collect::<Vec<_>>(),
        vec![a.uuid, b.uuid, c.uuid]
    );
    assert_eq!(
        thread.iter().map(|comment| comment.depth).collect::<Vec<_>>(),
        vec![1, 2, 1]
    );
}

#[test]
fn thread_is_permutation_of_note_comments() {
    let conn = store_with_note("atomic-habits");
    let repo = SqliteCommentRepository::new(&conn);

    let root_one = repo.append_comment("atomic-habits", None, "first root").unwrap();
    let root_two = repo.append_comment("atomic-habits", None, "second root").unwrap();
    repo.append_comment("atomic-habits", Some(root_two.uuid), "reply to second")
        .unwrap();
    repo.append_comment("atomic-habits", Some(root_one.uuid), "reply to first")
        .unwrap();

    let service = CommentService::new(SqliteCommentRepository::new(&conn));
    let thread = service.thread_for_note("atomic-habits").unwrap();
    let flat = repo.comments_for_note("atomic-habits").unwrap();

    let mut thread_ids: Vec<Uuid> = thread.iter().map(|comment| comment.uuid).collect();
    let mut flat_ids: Vec<Uuid> = flat.iter().map(|comment| comment.uuid).collect();
    thread_ids.sort();
    flat_ids.sort();
    assert_eq!(thread_ids, flat_ids);

    let position = |uuid: Uuid| {
        thread
            .iter()
            .position(|comment| comment.uuid == uuid)
            .unwrap()
    };
    for comment in &flat {
        if let Some(parent) = comment.parent_uuid {
            assert!(position(parent) < position(comment.uuid));
        }
    }
}

#[test]
fn rebuilding_unchanged_thread_is_identical() {
    let conn = store_with_note("atomic-habits");
    let repo = SqliteCommentRepository::new(&conn);

    let root = repo.append_comment("atomic-habits", None, "root").unwrap();
    repo.append_comment("atomic-habits", Some(root.uuid), "reply")
        .unwrap();
    repo.append_comment("atomic-habits", None, "another root")
        .unwrap();

    let service = CommentService::new(SqliteCommentRepository::new(&conn));
    let first = service.thread_for_note("atomic-habits").unwrap();
    let second = service.thread_for_note("atomic-habits").unwrap();
    assert_eq!(first, second);
}

#[test]
fn unknown_note_yields_empty_thread() {
    let conn = store_with_note("atomic-habits");
    let service = CommentService::new(SqliteCommentRepository::new(&conn));

    let thread = service.thread_for_note("never-seeded").unwrap();
    assert!(thread.is_empty());
}

#[test]
fn new_reply_is_positioned_under_its_parent_on_requery() {
    let conn = store_with_note("atomic-habits");
    let service = CommentService::new(SqliteCommentRepository::new(&conn));

    let root_one = service.post_comment("atomic-habits", None, "first").unwrap();
    let root_two = service.post_comment("atomic-habits", None, "second").unwrap();
    let reply = service
        .post_comment("atomic-habits", Some(root_one.uuid), "late reply to first")
        .unwrap();

    let thread = service.thread_for_note("atomic-habits").unwrap();
    assert_eq!(
        thread.iter().map(|comment| comment.uuid).collect::<Vec<_>>(),
        vec![root_one.uuid, reply.uuid, root_two.uuid]
    );
}
