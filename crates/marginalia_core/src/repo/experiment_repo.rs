//! Experiment catalog repository contract and SQLite implementation.
//!
//! Same shape and error taxonomy as the note catalog: seeded once at
//! startup, read-only afterwards.

use crate::model::experiment::{Experiment, ExperimentStatus};
use crate::repo::note_repo::{CatalogRepoError, CatalogRepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for the experiments catalog.
pub trait ExperimentRepository {
    /// Inserts one experiment. Seed path only.
    fn insert_experiment(&self, experiment: &Experiment) -> CatalogRepoResult<()>;
    /// Lists all experiments, newest first.
    fn list_experiments(&self) -> CatalogRepoResult<Vec<Experiment>>;
}

/// SQLite-backed experiments repository.
pub struct SqliteExperimentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExperimentRepository<'conn> {
    /// Creates a repository from a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ExperimentRepository for SqliteExperimentRepository<'_> {
    fn insert_experiment(&self, experiment: &Experiment) -> CatalogRepoResult<()> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM experiments WHERE slug = ?1;",
                params![experiment.slug.as_str()],
                |_| Ok(()),
            )
            .optional()?;
        if exists.is_some() {
            return Err(CatalogRepoError::DuplicateSlug(experiment.slug.clone()));
        }

        self.conn.execute(
            "INSERT INTO experiments (slug, title, description, status, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                experiment.slug.as_str(),
                experiment.title.as_str(),
                experiment.description.as_str(),
                status_to_db(experiment.status),
                experiment.created_at,
            ],
        )?;

        Ok(())
    }

    fn list_experiments(&self) -> CatalogRepoResult<Vec<Experiment>> {
        let mut stmt = self.conn.prepare(
            "SELECT slug, title, description, status, created_at
             FROM experiments
             ORDER BY created_at DESC, slug ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut experiments = Vec::new();
        while let Some(row) = rows.next()? {
            experiments.push(parse_experiment_row(row)?);
        }

        Ok(experiments)
    }
}

fn parse_experiment_row(row: &Row<'_>) -> CatalogRepoResult<Experiment> {
    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        CatalogRepoError::InvalidData(format!(
            "invalid experiment status `{status_text}` in experiments.status"
        ))
    })?;

    Ok(Experiment {
        slug: row.get("slug")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status,
        created_at: row.get("created_at")?,
    })
}

fn status_to_db(status: ExperimentStatus) -> &'static str {
    match status {
        ExperimentStatus::Active => "active",
        ExperimentStatus::Completed => "completed",
        ExperimentStatus::Paused => "paused",
    }
}

fn parse_status(value: &str) -> Option<ExperimentStatus> {
    match value {
        "active" => Some(ExperimentStatus::Active),
        "completed" => Some(ExperimentStatus::Completed),
        "paused" => Some(ExperimentStatus::Paused),
        _ => None,
    }
}
