pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

/// A solution ready to be written. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSolution<'a> {
    pub subject: &'a str,
    pub question: &'a str,
    pub answer: &'a str,
    pub steps: &'a [String],
}

/// Where solutions are written. Write-once: no update, no delete.
#[async_trait]
pub trait SolutionStore: Send + Sync {
    /// Insert one row and return its generated id.
    async fn insert(&self, solution: &NewSolution<'_>) -> Result<i64>;
}
