//! Project-wide constants.

use std::time::Duration;

/// Subject used when the request does not name one.
pub const DEFAULT_SUBJECT: &str = "Математика";

/// Default OpenAI chat model when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default OpenAI API root.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Sampling temperature for an ungrounded answer.
pub const TEMPERATURE: f32 = 0.7;

/// Sampling temperature when the prompt carries gathered context.
pub const GROUNDED_TEMPERATURE: f32 = 0.3;

/// Per-call timeout for every context lookup.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(4);

/// Upper bound (in chars) for any snippet or computed answer kept from a lookup.
pub const SNIPPET_MAX_CHARS: usize = 300;

/// Encyclopedia results kept per request.
pub const MAX_ENCYCLOPEDIA_RESULTS: usize = 3;

/// Trusted domains checked per request.
pub const MAX_VERIFIED_DOMAINS: usize = 2;

// Environment keys.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_WOLFRAM_APP_ID: &str = "WOLFRAM_APP_ID";
pub const ENV_CONTEXT_LOOKUP: &str = "CONTEXT_LOOKUP";
pub const ENV_DEFAULT_SUBJECT: &str = "DEFAULT_SUBJECT";

/// Truncate to at most `max` chars, never splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
