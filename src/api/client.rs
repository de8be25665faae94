//! HTTP client for the completion service.

use std::error::Error as StdError;
use std::fmt;

use tracing::debug;

use crate::api::{ChatMessage, ChatRequest, ChatResponse, ModelsResponse};
use crate::utils::url::construct_api_url;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const KEY_CONSOLE_URL: &str = "https://console.groq.com/keys";

/// Errors surfaced by API calls.
#[derive(Debug)]
pub enum ApiError {
    /// The request could not be sent or the response body could not be read.
    Http(reqwest::Error),

    /// The service answered with a non-success HTTP status.
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http(source) => write!(f, "API request failed: {source}"),
            ApiError::Status { status, body } => {
                write!(f, "API request failed with status {status}: {body}")
            }
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Http(source) => Some(source),
            ApiError::Status { .. } => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(source: reqwest::Error) -> Self {
        ApiError::Http(source)
    }
}

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Check the key against the models endpoint; any success status counts
    /// as valid.
    pub async fn verify_key(&self) -> Result<(), ApiError> {
        self.get_models().await.map(|_| ())
    }

    pub async fn list_models(&self) -> Result<Vec<String>, ApiError> {
        let models = self.get_models().await?;
        Ok(models.data.into_iter().map(|model| model.id).collect())
    }

    /// Send one chat turn and return the first choice's message content.
    pub async fn chat(&self, model: &str, messages: Vec<ChatMessage>) -> Result<String, ApiError> {
        let url = construct_api_url(&self.base_url, "chat/completions");
        debug!(%url, model, "sending chat request");
        let request = ChatRequest {
            model: model.to_string(),
            messages,
        };
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        let parsed = response.json::<ChatResponse>().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default();
        Ok(content)
    }

    async fn get_models(&self) -> Result<ModelsResponse, ApiError> {
        let url = construct_api_url(&self.base_url, "models");
        debug!(%url, "fetching models");
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(response.json::<ModelsResponse>().await?)
    }
}
