use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Completer, CompletionRequest};

/// Calls the OpenAI Chat Completions API. One request per call, no retries.
pub struct OpenAiCompleter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiCompleter {
    pub fn new(api_key: String, model: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_body<'a>(&'a self, request: &'a CompletionRequest) -> ApiRequest<'a> {
        ApiRequest {
            model: &self.model,
            temperature: request.temperature,
            messages: vec![
                Message {
                    role: "system",
                    content: &request.prompt.system,
                },
                Message {
                    role: "user",
                    content: &request.prompt.user,
                },
            ],
        }
    }
}

#[async_trait]
impl Completer for OpenAiCompleter {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = self.build_body(request);

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("failed to reach OpenAI")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            bail!("OpenAI API error ({}): {}", status, text);
        }

        let api_resp: ApiResponse = resp
            .json()
            .await
            .context("failed to decode OpenAI response")?;

        if let Some(usage) = &api_resp.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion usage"
            );
        }

        first_choice_text(api_resp)
    }
}

fn first_choice_text(resp: ApiResponse) -> Result<String> {
    let text = resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    if text.trim().is_empty() {
        bail!("OpenAI API returned empty response");
    }
    Ok(text)
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}
