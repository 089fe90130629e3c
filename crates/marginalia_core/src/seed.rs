//! Startup fixture loader for the sample catalog and discussion.
//!
//! # Responsibility
//! - Seed the note and experiment catalogs once at startup.
//! - Replay the sample discussion through `append_comment` so ids,
//!   timestamps and depths are store-assigned like any live submission.
//!
//! # Invariants
//! - Comments are replayed in chronological order; with strictly monotonic
//!   timestamp assignment this reproduces the original thread shapes.
//! - Seeding targets a fresh store; it is not idempotent.

use crate::model::experiment::{Experiment, ExperimentStatus};
use crate::model::note::{Note, NoteKind};
use crate::repo::comment_repo::{
    CommentRepoError, CommentRepository, SqliteCommentRepository,
};
use crate::repo::experiment_repo::{ExperimentRepository, SqliteExperimentRepository};
use crate::repo::note_repo::{CatalogRepoError, NoteRepository, SqliteNoteRepository};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

const CREATED_2024_01_10: i64 = 1_704_844_800_000;
const CREATED_2024_01_20: i64 = 1_705_708_800_000;
const CREATED_2024_02_15: i64 = 1_707_955_200_000;
const CREATED_2024_02_20: i64 = 1_708_387_200_000;
const CREATED_2024_03_01: i64 = 1_709_251_200_000;
const CREATED_2024_03_15: i64 = 1_710_460_800_000;

/// Errors from fixture seeding.
#[derive(Debug)]
pub enum SeedError {
    /// Catalog insert failed.
    Catalog(CatalogRepoError),
    /// Sample discussion replay failed.
    Comment(CommentRepoError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "{err}"),
            Self::Comment(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            Self::Comment(err) => Some(err),
        }
    }
}

impl From<CatalogRepoError> for SeedError {
    fn from(value: CatalogRepoError) -> Self {
        Self::Catalog(value)
    }
}

impl From<CommentRepoError> for SeedError {
    fn from(value: CommentRepoError) -> Self {
        Self::Comment(value)
    }
}

/// Seeds the sample notes, experiments and discussion into a fresh store.
pub fn seed_sample_content(conn: &Connection) -> Result<(), SeedError> {
    let note_repo = SqliteNoteRepository::new(conn);
    for note in sample_notes() {
        note_repo.insert_note(&note)?;
    }

    let experiment_repo = SqliteExperimentRepository::new(conn);
    for experiment in sample_experiments() {
        experiment_repo.insert_experiment(&experiment)?;
    }

    let comment_repo = SqliteCommentRepository::new(conn);
    seed_sample_discussion(&comment_repo)?;

    info!("event=seed module=seed status=ok notes=3 experiments=3 comments=10");
    Ok(())
}

fn sample_notes() -> Vec<Note> {
    vec![
        Note::new(
            "atomic-habits",
            "Atomic Habits",
            "James Clear",
            NoteKind::Book,
            "The core thesis is that small, incremental changes compound into \
             remarkable results over time.\n\n\
             **Key Takeaways:**\n\n\
             1. **Habits are the compound interest of self-improvement.** \
             Getting 1% better every day counts for a lot in the long run.\n\
             2. **The Four Laws of Behavior Change:** make it obvious, \
             attractive, easy, and satisfying.\n\
             3. **Identity-based habits** beat outcome-based habits. Instead \
             of \"I want to run a marathon,\" think \"I am a runner.\"\n\
             4. **The Two-Minute Rule:** a new habit should take less than \
             two minutes to start. The point is to master showing up.\n\n\
             You don't rise to the level of your goals; you fall to the \
             level of your systems.",
            CREATED_2024_03_15,
        ),
        Note::new(
            "mom-test",
            "The Mom Test",
            "Rob Fitzpatrick",
            NoteKind::Book,
            "The definitive guide on how to talk to customers and learn if \
             your business idea is any good, without them knowing what \
             you're building.\n\n\
             **The Mom Test Rules:**\n\n\
             1. **Talk about their life, not your idea.**\n\
             2. **Ask about specifics in the past, not generics about the \
             future.**\n\
             3. **Talk less, listen more.**\n\n\
             Real signal comes from commitment: time, reputation, or money. \
             If someone says they'd pay, ask for a pre-order. If they won't \
             commit, the compliment was hollow.",
            CREATED_2024_02_20,
        ),
        Note::new(
            "zero-to-one",
            "Zero to One",
            "Peter Thiel",
            NoteKind::Book,
            "A contrarian manifesto on startups and innovation. The title \
             refers to creating something genuinely new (going from 0 to 1) \
             versus copying what works (going from 1 to n).\n\n\
             **The Contrarian Question:** \"What important truth do very few \
             people agree with you on?\"\n\n\
             **On Competition:** competition drives down profits; the goal \
             is monopoly through innovation.\n\n\
             **Definite vs. Indefinite Thinking:** the lack of definite \
             thinking leads to incrementalism. Bold plans seem irrational \
             when you don't believe the future is knowable.",
            CREATED_2024_01_10,
        ),
    ]
}

fn sample_experiments() -> Vec<Experiment> {
    vec![
        Experiment {
            slug: "exp-sales-funnel".to_string(),
            title: "Sales Funnel Optimization".to_string(),
            description: "Testing new email sequences with different value \
                          propositions. A/B testing subject lines, send \
                          times, and CTA placements."
                .to_string(),
            status: ExperimentStatus::Active,
            created_at: CREATED_2024_03_01,
        },
        Experiment {
            slug: "exp-market-expansion".to_string(),
            title: "Market Expansion Analysis".to_string(),
            description: "Researching new cities for potential expansion. \
                          Analyzing demographics, competition density, and \
                          regulatory environment."
                .to_string(),
            status: ExperimentStatus::Active,
            created_at: CREATED_2024_02_15,
        },
        Experiment {
            slug: "exp-crm-integration".to_string(),
            title: "CRM Integration".to_string(),
            description: "Automated deal scoring based on engagement \
                          signals. Connected email, calendar, and website \
                          analytics for unified view."
                .to_string(),
            status: ExperimentStatus::Completed,
            created_at: CREATED_2024_01_20,
        },
    ]
}

/// Replays the sample discussion oldest-first so thread shapes match the
/// original site's fixtures: a three-deep chain plus a second top-level
/// comment on two notes, and a pair of short threads on the third.
fn seed_sample_discussion(repo: &impl CommentRepository) -> Result<(), CommentRepoError> {
    // Zero to One
    let zto_root = repo.append_comment(
        "zero-to-one",
        None,
        "The definite vs indefinite optimism framework explains so much \
         about why big projects feel impossible today.",
    )?;
    let zto_reply = repo.append_comment(
        "zero-to-one",
        Some(zto_root.uuid),
        "Agreed. We used to build nuclear plants in 5 years. Now we spend 5 \
         years on environmental reviews.",
    )?;
    repo.append_comment(
        "zero-to-one",
        Some(zto_reply.uuid),
        "Though I wonder if some of that caution is warranted. The 50s also \
         gave us a lot of environmental disasters.",
    )?;

    // The Mom Test
    let mom_root = repo.append_comment(
        "mom-test",
        None,
        "Wish I read this before my first startup. We built for 8 months \
         based on \"that sounds useful\" feedback.",
    )?;
    repo.append_comment(
        "mom-test",
        Some(mom_root.uuid),
        "Same. The pre-order test would have saved us so much time.",
    )?;
    repo.append_comment(
        "mom-test",
        None,
        "The \"how are you dealing with this now\" question is gold. If \
         they're not actively trying to solve it, they won't pay for your \
         solution either.",
    )?;

    // Atomic Habits
    let habits_root = repo.append_comment(
        "atomic-habits",
        None,
        "The two-minute rule completely changed how I approach new habits. \
         Started with \"put on running shoes\" and now I run 5km daily.",
    )?;
    let habits_reply = repo.append_comment(
        "atomic-habits",
        Some(habits_root.uuid),
        "How long did it take before it felt automatic?",
    )?;
    repo.append_comment(
        "atomic-habits",
        Some(habits_reply.uuid),
        "About 3 weeks. The first week was rough but after that putting on \
         shoes became the trigger for the whole routine.",
    )?;
    repo.append_comment(
        "atomic-habits",
        None,
        "I think the identity piece is underrated. Saying \"I don't eat \
         sugar\" vs \"I'm trying to quit sugar\" hits completely different.",
    )?;

    Ok(())
}
