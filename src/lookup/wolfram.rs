//! Short-answer computation via the Wolfram|Alpha Short Answers API.
//!
//! The API answers with plain text. A 501 means "no short answer for this
//! input", which is an ordinary empty result rather than a failure.

use super::{LookupError, USER_AGENT};
use crate::consts::{LOOKUP_TIMEOUT, SNIPPET_MAX_CHARS, truncate_chars};

pub const API_URL: &str = "https://api.wolframalpha.com/v1/result";

pub(crate) async fn short_answer(
    client: &reqwest::Client,
    endpoint: &str,
    app_id: &str,
    question: &str,
) -> Result<Option<String>, LookupError> {
    let resp = client
        .get(endpoint)
        .query(&[("appid", app_id), ("i", question)])
        .header("User-Agent", USER_AGENT)
        .timeout(LOOKUP_TIMEOUT)
        .send()
        .await?;

    if resp.status() == reqwest::StatusCode::NOT_IMPLEMENTED {
        return Ok(None);
    }
    if !resp.status().is_success() {
        return Err(LookupError::Status(resp.status()));
    }

    Ok(clean_answer(&resp.text().await?))
}

fn clean_answer(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(truncate_chars(text, SNIPPET_MAX_CHARS))
    }
}
