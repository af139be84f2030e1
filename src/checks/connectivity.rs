use super::{Check, CheckResult};
use crate::{
    config::Config,
    llm::{ChatClient, ChatCompletion, ChatMessage, ChatRequest, Credentials, RemoteCallError},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where to look next when the probe fails.
pub const REMEDIATION_HINTS: &[&str] = &[
    "Railway deployment logs",
    "Browser console for WebSocket errors",
    "Retell dashboard for any error messages",
];

/// Sends one small chat completion and reports whether text came back.
pub struct ConnectivityCheck {
    config: Config,
    client: Arc<dyn ChatClient>,
}

impl ConnectivityCheck {
    pub fn new(config: Config, client: Arc<dyn ChatClient>) -> Self {
        Self { config, client }
    }

    pub fn request(&self) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage::user(self.config.prompt.clone())],
            max_tokens: self.config.max_tokens,
        }
    }

    fn credentials(&self) -> Result<Credentials, RemoteCallError> {
        let api_key = self
            .config
            .openai_api_key
            .clone()
            .ok_or(RemoteCallError::MissingApiKey)?;
        Ok(Credentials {
            api_key,
            organization: self.config.openai_organization_id.clone(),
        })
    }

    /// Single attempt, no retry.
    pub async fn probe(&self) -> Result<String, RemoteCallError> {
        let credentials = self.credentials()?;
        let request = self.request();
        debug!(
            "Probing {} with organization scope: {}",
            request.model,
            credentials.organization.is_some()
        );

        let completion: ChatCompletion = self.client.complete(&credentials, &request).await?;
        completion
            .first_text()
            .map(str::to_string)
            .ok_or(RemoteCallError::EmptyResponse)
    }
}

#[async_trait]
impl Check for ConnectivityCheck {
    fn name(&self) -> &str {
        "connectivity"
    }

    fn banner(&self) -> &str {
        "Testing OpenAI API connection..."
    }

    async fn run(&self) -> CheckResult {
        match self.probe().await {
            Ok(text) => {
                info!("Chat completion returned {} chars", text.len());
                CheckResult::pass_with(text)
            }
            Err(e) => {
                warn!("Chat completion probe failed: {}", e);
                CheckResult::fail(e.to_string())
            }
        }
    }

    fn describe(&self, result: &CheckResult) -> String {
        if result.passed {
            format!("✅ OpenAI API working: {}", result.explanation())
        } else {
            format!("❌ OpenAI API error: {}", result.explanation())
        }
    }

    fn failure_summary(&self) -> &str {
        "❌ OpenAI API test failed. Check your API key and organization ID."
    }

    fn hints(&self) -> &[&str] {
        REMEDIATION_HINTS
    }
}
