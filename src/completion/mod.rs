pub mod mock;
pub mod openai;
pub mod parse;

use anyhow::Result;
use async_trait::async_trait;

use crate::prompts::PromptPair;

/// One completion call: the instruction pair and how random to be.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: PromptPair,
    pub temperature: f32,
}

/// A text-completion service. Could be OpenAI, a local model, or a test script.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Returns the raw text of the first choice. Empty text is an error.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
