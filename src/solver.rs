//! The solve pipeline: gather → prompt → complete → parse → persist.
//!
//! Stages run strictly in order, once each. Only context gathering is
//! allowed to fail quietly; every other failure is a [`SolveError`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::completion::parse::{ModelAnswer, parse_model_answer};
use crate::completion::{Completer, CompletionRequest};
use crate::consts::{GROUNDED_TEMPERATURE, TEMPERATURE};
use crate::error::{Result, SolveError};
use crate::lookup::{ContextBundle, ContextGatherer};
use crate::prompts::build_solve_prompt;
use crate::request::SolveRequest;
use crate::store::{NewSolution, SolutionStore};

pub const MISSING_API_KEY: &str = "OpenAI API key not configured";

/// Id reported when no store is configured.
pub const UNSAVED_ID: &str = "0";

/// A finished solution, as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub id: String,
    pub subject: String,
    pub question: String,
    pub answer: String,
    pub steps: Vec<String>,
}

pub struct Solver {
    completer: Option<Arc<dyn Completer>>,
    gatherer: Option<ContextGatherer>,
    store: Option<Box<dyn SolutionStore>>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// A solver with nothing attached: no credential, no lookups, no store.
    pub fn new() -> Self {
        Self {
            completer: None,
            gatherer: None,
            store: None,
        }
    }

    pub fn with_completer(mut self, completer: Arc<dyn Completer>) -> Self {
        self.completer = Some(completer);
        self
    }

    pub fn with_gatherer(mut self, gatherer: ContextGatherer) -> Self {
        self.gatherer = Some(gatherer);
        self
    }

    pub fn with_store(mut self, store: Box<dyn SolutionStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn solve(&self, request: &SolveRequest) -> Result<Solution> {
        let completer = self
            .completer
            .as_deref()
            .ok_or_else(|| SolveError::Configuration(MISSING_API_KEY.to_string()))?;

        let context = match &self.gatherer {
            Some(gatherer) => gatherer.gather(&request.subject, &request.question).await,
            None => ContextBundle::default(),
        };

        let temperature = if context.is_empty() {
            TEMPERATURE
        } else {
            GROUNDED_TEMPERATURE
        };
        let completion = CompletionRequest {
            prompt: build_solve_prompt(&request.subject, &request.question, &context),
            temperature,
        };

        let text = completer
            .complete(&completion)
            .await
            .map_err(SolveError::Upstream)?;
        debug!(chars = text.len(), "completion received");

        let parsed = parse_model_answer(&text)?;
        let mut steps = parsed.steps.clone();
        if !context.is_empty() {
            steps.push(summary_step(&context, &parsed));
        }

        let id = self
            .persist(&NewSolution {
                subject: &request.subject,
                question: &request.question,
                answer: &parsed.answer,
                steps: &steps,
            })
            .await?;

        info!(
            id = %id,
            subject = %request.subject,
            steps = steps.len(),
            grounded = !context.is_empty(),
            "solved"
        );

        Ok(Solution {
            id,
            subject: request.subject.clone(),
            question: request.question.clone(),
            answer: parsed.answer,
            steps,
        })
    }

    async fn persist(&self, solution: &NewSolution<'_>) -> Result<String> {
        match &self.store {
            Some(store) => store
                .insert(solution)
                .await
                .map(|id| id.to_string())
                .map_err(SolveError::Store),
            None => Ok(UNSAVED_ID.to_string()),
        }
    }
}

/// One closing line naming the consulted sources and the confidence.
///
/// The model's own confidence wins; otherwise it is estimated from how many
/// sources answered. Sources the model says it relied on are listed last.
pub fn summary_step(context: &ContextBundle, answer: &ModelAnswer) -> String {
    let sources = context.source_names();
    let confidence = match answer.confidence.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => match sources.len() {
            0 | 1 => "низкая".to_string(),
            2 => "средняя".to_string(),
            _ => "высокая".to_string(),
        },
    };
    let checked = sources
        .iter()
        .map(|s| format!("{s} ✓"))
        .collect::<Vec<_>>()
        .join(" ");
    let mut line = format!("🌍 Достоверность: {confidence} | Проверено: {checked}");

    let used: Vec<&str> = answer
        .sources_used
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if !used.is_empty() {
        line.push_str(&format!(" | Использовано: {}", used.join(", ")));
    }
    line
}
