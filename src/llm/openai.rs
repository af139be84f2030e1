use super::{ChatClient, ChatCompletion, ChatRequest, Credentials, RemoteCallError};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

const ORGANIZATION_HEADER: &str = "OpenAI-Organization";
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Chat-completion client for the OpenAI HTTP API (or anything that speaks it).
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteCallError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("retell-preflight/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteCallError::InvalidConfig(e.to_string()))?;

        Ok(Self::with_http(http, base_url))
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(
        &self,
        credentials: &Credentials,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, RemoteCallError> {
        let url = self.endpoint();
        debug!("POST {} (model {})", url, request.model);

        let mut builder = self
            .http
            .post(&url)
            .bearer_auth(&credentials.api_key)
            .json(request);
        if let Some(org) = &credentials.organization {
            builder = builder.header(ORGANIZATION_HEADER, org);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Chat completion rejected with status {}", status.as_u16());
            return Err(RemoteCallError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| RemoteCallError::Decode(e.to_string()))
    }
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS),
    }
}

// Non-JSON bodies (gateway HTML pages) end up on a single console line.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}
