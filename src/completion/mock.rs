use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Completer, CompletionRequest};

/// A scripted completer for tests. Returns pre-defined replies in order and
/// records every request it receives.
pub struct MockCompleter {
    replies: Vec<Result<String, String>>,
    index: AtomicUsize,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompleter {
    pub fn new(replies: Vec<&str>) -> Self {
        Self::scripted(replies.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    /// A completer whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self::scripted(vec![Err(message.to_string())])
    }

    pub fn scripted(replies: Vec<Result<String, String>>) -> Self {
        Self {
            replies,
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Completer for MockCompleter {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request.clone());
        }
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        let reply = self.replies.get(i).ok_or_else(|| {
            anyhow::anyhow!("MockCompleter: no more replies (called {} times)", i + 1)
        })?;
        match reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}
