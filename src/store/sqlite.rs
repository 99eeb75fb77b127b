use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, params};

use super::{NewSolution, SolutionStore};

/// The table this store writes to. Creating it is the operator's job;
/// the statement is kept here for provisioning scripts and tests.
pub const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS solutions (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    subject    TEXT NOT NULL,
    question   TEXT NOT NULL,
    answer     TEXT NOT NULL,
    steps      TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)";

/// SQLite-backed solution store.
///
/// Holds only the target path. Each insert opens its own connection, which
/// is dropped (and thereby closed) on every return path.
pub struct SqliteStore {
    path: String,
}

impl SqliteStore {
    /// Accepts `sqlite://path`, `sqlite:path`, or a bare path / `:memory:`.
    pub fn new(url: &str) -> Self {
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);
        Self {
            path: path.to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

struct Row {
    subject: String,
    question: String,
    answer: String,
    steps: String,
}

fn insert_blocking(path: &str, row: &Row) -> Result<i64> {
    let mut conn =
        Connection::open(path).with_context(|| format!("failed to open database {path}"))?;
    let tx = conn.transaction()?;
    let id: i64 = tx
        .query_row(
            "INSERT INTO solutions (subject, question, answer, steps)
             VALUES (?1, ?2, ?3, ?4) RETURNING id",
            params![row.subject, row.question, row.answer, row.steps],
            |r| r.get(0),
        )
        .context("failed to insert solution")?;
    tx.commit().context("failed to commit solution")?;
    Ok(id)
}

#[async_trait]
impl SolutionStore for SqliteStore {
    async fn insert(&self, solution: &NewSolution<'_>) -> Result<i64> {
        // rusqlite blocks; keep it off the async workers.
        let path = self.path.clone();
        let row = Row {
            subject: solution.subject.to_string(),
            question: solution.question.to_string(),
            answer: solution.answer.to_string(),
            steps: serde_json::to_string(solution.steps)?,
        };
        tokio::task::spawn_blocking(move || insert_blocking(&path, &row))
            .await
            .context("insert task failed")?
    }
}
