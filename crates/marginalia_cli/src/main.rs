//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `marginalia_core` wiring.
//! - Seed the sample content and print the activity feed for a quick
//!   local sanity check.

use marginalia_core::db::open_db_in_memory;
use marginalia_core::{seed_sample_content, FeedService, SqliteCommentRepository};

fn main() {
    println!("marginalia_core ping={}", marginalia_core::ping());
    println!("marginalia_core version={}", marginalia_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open in-memory store: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = seed_sample_content(&conn) {
        eprintln!("failed to seed sample content: {err}");
        std::process::exit(1);
    }

    let feed = FeedService::new(SqliteCommentRepository::new(&conn));
    match feed.recent_comments(Some(6)) {
        Ok(entries) => {
            println!("recent activity ({} entries):", entries.len());
            for entry in entries {
                println!(
                    "  [{}] depth={} on {}",
                    entry.comment.created_at, entry.comment.depth, entry.note_title
                );
            }
        }
        Err(err) => {
            eprintln!("failed to load recent activity: {err}");
            std::process::exit(1);
        }
    }
}
