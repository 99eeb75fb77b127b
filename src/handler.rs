//! HTTP boundary: method dispatch and error → status mapping.
//!
//! Every outcome, including upstream, parse and store failures, becomes a
//! well-formed [`HttpResponse`]. Nothing propagates past [`Handler::handle`].

use std::sync::Arc;

use tracing::{error, warn};

use crate::completion::openai::OpenAiCompleter;
use crate::config::Config;
use crate::http::{HttpRequest, HttpResponse};
use crate::lookup::ContextGatherer;
use crate::request::SolveRequest;
use crate::solver::Solver;
use crate::store::sqlite::SqliteStore;

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

pub struct Handler {
    solver: Solver,
    default_subject: String,
}

impl Handler {
    pub fn new(solver: Solver, default_subject: impl Into<String>) -> Self {
        Self {
            solver,
            default_subject: default_subject.into(),
        }
    }

    /// Wire production collaborators from configuration. Anything the config
    /// leaves out stays unattached: no key → no completer, no URL → no store.
    pub fn from_config(config: &Config) -> Self {
        let mut solver = Solver::new();

        if let Some(key) = &config.openai_api_key {
            solver = solver.with_completer(Arc::new(OpenAiCompleter::new(
                key.clone(),
                config.openai_model.clone(),
                config.openai_base_url.clone(),
            )));
        }
        if config.context_lookup {
            solver = solver.with_gatherer(ContextGatherer::new(config.wolfram_app_id.clone()));
        }
        if let Some(url) = &config.database_url {
            solver = solver.with_store(Box::new(SqliteStore::new(url)));
        }

        Self::new(solver, config.default_subject.clone())
    }

    pub async fn handle(&self, request: &HttpRequest) -> HttpResponse {
        match request.http_method.as_str() {
            "OPTIONS" => HttpResponse::preflight(),
            "POST" => self.solve(request.body.as_deref()).await,
            other => {
                warn!(method = other, "rejected method");
                HttpResponse::error(405, METHOD_NOT_ALLOWED)
            }
        }
    }

    async fn solve(&self, body: Option<&str>) -> HttpResponse {
        let outcome = match SolveRequest::from_body(body, &self.default_subject) {
            Ok(request) => self.solver.solve(&request).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(solution) => HttpResponse::json(200, &solution),
            Err(e) => {
                let status = e.status_code();
                if status >= 500 {
                    error!(status, error = %e, "solve failed");
                } else {
                    warn!(status, error = %e, "solve rejected");
                }
                HttpResponse::error(status, &e.public_message())
            }
        }
    }
}
