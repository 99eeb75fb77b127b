//! Best-effort context gathering.
//!
//! Each sub-lookup is an independent call with its own timeout. A failing
//! lookup (network, timeout, non-2xx, undecodable body) is logged at debug
//! level and contributes nothing; [`ContextGatherer::gather`] itself cannot
//! fail. Lookups run one after another, never concurrently.

pub mod web;
pub mod wikipedia;
pub mod wolfram;

use thiserror::Error;
use tracing::debug;

use crate::consts::MAX_VERIFIED_DOMAINS;
use crate::subjects;

const USER_AGENT: &str = concat!(
    "tutor/",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_REPOSITORY"),
    ")"
);

/// Display names of the fixed sources, as they appear in the summary step.
pub const WIKIPEDIA: &str = "Wikipedia";
pub const WOLFRAM_ALPHA: &str = "Wolfram Alpha";

/// Why a single lookup produced nothing. Never leaves this module.
#[derive(Error, Debug)]
pub(crate) enum LookupError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

/// A short excerpt from an external source.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub source_name: String,
    pub title: String,
    pub text: String,
}

/// What the gatherer found. Any field may be empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextBundle {
    pub encyclopedia: Vec<Snippet>,
    pub computed_answer: Option<String>,
    pub verified_domains: Vec<String>,
}

impl ContextBundle {
    pub fn is_empty(&self) -> bool {
        self.encyclopedia.is_empty()
            && self.computed_answer.is_none()
            && self.verified_domains.is_empty()
    }

    /// Names of everything that contributed, in a stable order.
    pub fn source_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if !self.encyclopedia.is_empty() {
            names.push(WIKIPEDIA.to_string());
        }
        if self.computed_answer.is_some() {
            names.push(WOLFRAM_ALPHA.to_string());
        }
        names.extend(self.verified_domains.iter().cloned());
        names
    }

    /// Flatten into plain text for the prompt. Empty bundle → empty string.
    pub fn to_prompt_text(&self) -> String {
        let mut sections: Vec<String> = Vec::new();

        if !self.encyclopedia.is_empty() {
            let lines = self
                .encyclopedia
                .iter()
                .map(|s| format!("- [{}] {}: {}", s.source_name, s.title, s.text))
                .collect::<Vec<_>>()
                .join("\n");
            sections.push(format!("Справочные материалы:\n{lines}"));
        }

        if let Some(answer) = &self.computed_answer {
            sections.push(format!("Результат вычисления ({WOLFRAM_ALPHA}): {answer}"));
        }

        if !self.verified_domains.is_empty() {
            sections.push(format!(
                "Проверенные источники по теме: {}",
                self.verified_domains.join(", ")
            ));
        }

        sections.join("\n\n")
    }
}

/// Where each lookup sends its request. Overridable for tests and mirrors.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub wikipedia: String,
    pub wolfram: String,
    pub web_search: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            wikipedia: wikipedia::API_URL.to_string(),
            wolfram: wolfram::API_URL.to_string(),
            web_search: web::SEARCH_URL.to_string(),
        }
    }
}

pub struct ContextGatherer {
    client: reqwest::Client,
    endpoints: Endpoints,
    wolfram_app_id: Option<String>,
}

impl ContextGatherer {
    pub fn new(wolfram_app_id: Option<String>) -> Self {
        Self::with_endpoints(Endpoints::default(), wolfram_app_id)
    }

    pub fn with_endpoints(endpoints: Endpoints, wolfram_app_id: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
            wolfram_app_id,
        }
    }

    /// Run every applicable lookup for this subject and question.
    pub async fn gather(&self, subject: &str, question: &str) -> ContextBundle {
        let profile = subjects::profile(subject);
        let mut bundle = ContextBundle::default();

        let query = format!("{question} {subject}");
        match wikipedia::search(&self.client, &self.endpoints.wikipedia, &query).await {
            Ok(snippets) => bundle.encyclopedia = snippets,
            Err(e) => debug!(error = %e, "encyclopedia lookup failed"),
        }

        if profile.quantitative
            && let Some(app_id) = &self.wolfram_app_id
        {
            match wolfram::short_answer(&self.client, &self.endpoints.wolfram, app_id, question)
                .await
            {
                Ok(answer) => bundle.computed_answer = answer,
                Err(e) => debug!(error = %e, "computation lookup failed"),
            }
        }

        for domain in profile.trusted_domains.iter().take(MAX_VERIFIED_DOMAINS) {
            match web::confirm(&self.client, &self.endpoints.web_search, domain, question).await {
                Ok(()) => bundle.verified_domains.push(domain.to_string()),
                Err(e) => debug!(domain, error = %e, "domain check failed"),
            }
        }

        debug!(
            snippets = bundle.encyclopedia.len(),
            computed = bundle.computed_answer.is_some(),
            verified = bundle.verified_domains.len(),
            "context gathered"
        );
        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(title: &str, text: &str) -> Snippet {
        Snippet {
            source_name: WIKIPEDIA.to_string(),
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn default_bundle_is_empty() {
        let bundle = ContextBundle::default();
        assert!(bundle.is_empty());
        assert!(bundle.source_names().is_empty());
        assert_eq!(bundle.to_prompt_text(), "");
    }

    #[test]
    fn any_field_makes_bundle_non_empty() {
        let bundle = ContextBundle {
            verified_domains: vec!["gramota.ru".to_string()],
            ..Default::default()
        };
        assert!(!bundle.is_empty());

        let bundle = ContextBundle {
            computed_answer: Some("4".to_string()),
            ..Default::default()
        };
        assert!(!bundle.is_empty());
    }

    #[test]
    fn source_names_in_order() {
        let bundle = ContextBundle {
            encyclopedia: vec![snippet("Сложение", "арифметическая операция")],
            computed_answer: Some("4".to_string()),
            verified_domains: vec!["mathprofi.ru".to_string(), "khanacademy.org".to_string()],
        };
        assert_eq!(
            bundle.source_names(),
            vec!["Wikipedia", "Wolfram Alpha", "mathprofi.ru", "khanacademy.org"]
        );
    }

    #[test]
    fn prompt_text_includes_every_section() {
        let bundle = ContextBundle {
            encyclopedia: vec![snippet("Сложение", "арифметическая операция")],
            computed_answer: Some("4".to_string()),
            verified_domains: vec!["mathprofi.ru".to_string()],
        };
        let text = bundle.to_prompt_text();
        assert!(text.contains("[Wikipedia] Сложение: арифметическая операция"));
        assert!(text.contains("Wolfram Alpha): 4"));
        assert!(text.contains("mathprofi.ru"));
    }

    #[test]
    fn user_agent_names_crate_and_repository() {
        assert!(USER_AGENT.starts_with(concat!("tutor/", env!("CARGO_PKG_VERSION"))));
        assert!(USER_AGENT.contains("https://github.com/assapir/tutor"));
    }

    #[test]
    fn default_endpoints_are_https() {
        let endpoints = Endpoints::default();
        assert!(endpoints.wikipedia.starts_with("https://"));
        assert!(endpoints.wolfram.starts_with("https://"));
        assert!(endpoints.web_search.starts_with("https://"));
    }
}
