use async_trait::async_trait;

/// Seam to the external generative-text collaborator.
///
/// The orchestrator composes a full grounding prompt and hands it over as one
/// string; implementations own model selection, authentication, and transport.
/// Any failure is surfaced as an error — callers decide how to degrade.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, system_prompt: Option<&str>, message: &str)
    -> anyhow::Result<String>;

    fn name(&self) -> &'static str;
}
