//! Deterministic providers for tests and offline runs.

use crate::providers::traits::Provider;
use async_trait::async_trait;
use std::sync::Mutex;

/// Replays canned replies in order and records every prompt it receives.
/// Once the script is exhausted it keeps returning the last reply.
pub struct ScriptedProvider {
    replies: Mutex<Vec<String>>,
    last_reply: Mutex<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut replies: Vec<String> = replies.into_iter().map(Into::into).collect();
        replies.reverse();
        Self {
            last_reply: Mutex::new(
                replies.first().cloned().unwrap_or_else(|| "ok".to_string()),
            ),
            replies: Mutex::new(replies),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts seen so far, oldest first.
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    async fn generate(
        &self,
        system_prompt: Option<&str>,
        message: &str,
    ) -> anyhow::Result<String> {
        let mut full_prompt = String::new();
        if let Some(sys) = system_prompt {
            full_prompt.push_str(sys);
            full_prompt.push('\n');
        }
        full_prompt.push_str(message);
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(full_prompt);

        let mut replies = self.replies.lock().expect("script poisoned");
        match replies.pop() {
            Some(reply) => {
                *self.last_reply.lock().expect("reply poisoned") = reply.clone();
                Ok(reply)
            }
            None => Ok(self.last_reply.lock().expect("reply poisoned").clone()),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Always fails, for exercising the fallback-reply path.
pub struct FailingProvider {
    pub message: String,
}

impl FailingProvider {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl Provider for FailingProvider {
    async fn generate(
        &self,
        _system_prompt: Option<&str>,
        _message: &str,
    ) -> anyhow::Result<String> {
        anyhow::bail!("{}", self.message)
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_replays_in_order_then_repeats() {
        let provider = ScriptedProvider::new(["one", "two"]);
        assert_eq!(provider.generate(None, "a").await.expect("reply"), "one");
        assert_eq!(provider.generate(None, "b").await.expect("reply"), "two");
        assert_eq!(provider.generate(None, "c").await.expect("reply"), "two");
        assert_eq!(provider.recorded_prompts().len(), 3);
    }

    #[tokio::test]
    async fn failing_provider_always_errors() {
        let provider = FailingProvider::new("quota exhausted");
        let err = provider.generate(None, "hi").await.expect_err("must fail");
        assert!(err.to_string().contains("quota exhausted"));
    }
}
