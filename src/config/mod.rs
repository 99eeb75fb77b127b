//! Request-independent configuration, read from a string→string source.
//!
//! The process environment is one such source ([`Config::from_env`]); tests
//! pass a plain map to [`Config::from_source`]. Nothing here is global: the
//! resulting value is handed to the handler explicitly.

use std::collections::HashMap;

use crate::consts::{
    DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL, DEFAULT_SUBJECT, ENV_CONTEXT_LOOKUP, ENV_DATABASE_URL,
    ENV_DEFAULT_SUBJECT, ENV_OPENAI_API_KEY, ENV_OPENAI_BASE_URL, ENV_OPENAI_MODEL,
    ENV_WOLFRAM_APP_ID,
};

#[derive(Clone)]
pub struct Config {
    /// Completion service credential. `None` means every POST fails with 500.
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    /// Store target. `None` disables persistence.
    pub database_url: Option<String>,
    pub wolfram_app_id: Option<String>,
    pub context_lookup: bool,
    pub default_subject: String,
}

impl Config {
    /// Build from any key/value source. Blank values count as absent.
    pub fn from_source(source: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            source
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        Self {
            openai_api_key: get(ENV_OPENAI_API_KEY),
            openai_model: get(ENV_OPENAI_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: get(ENV_OPENAI_BASE_URL)
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            database_url: get(ENV_DATABASE_URL),
            wolfram_app_id: get(ENV_WOLFRAM_APP_ID),
            context_lookup: get(ENV_CONTEXT_LOOKUP)
                .map(|v| parse_switch(&v))
                .unwrap_or(true),
            default_subject: get(ENV_DEFAULT_SUBJECT)
                .unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        }
    }

    pub fn from_env() -> Self {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_source(&vars)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("database_url", &self.database_url)
            .field("wolfram_app_id", &self.wolfram_app_id.as_ref().map(|_| "<redacted>"))
            .field("context_lookup", &self.context_lookup)
            .field("default_subject", &self.default_subject)
            .finish()
    }
}

fn parse_switch(value: &str) -> bool {
    !matches!(
        value.to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}
