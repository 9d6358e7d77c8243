use crate::clients::gemini::{GeminiClient, GeminiConfig};
use crate::config::KeyFromEnv;
use crate::core::LowLevelClient;
use crate::error::AIError;
use async_trait::async_trait;
use std::env;
use std::sync::Arc;

/// Client type for selecting a backend at startup
#[derive(Debug, Clone)]
pub enum ClientType {
    Gemini,
    Mock,
}

impl Default for ClientType {
    /// Get the default client type based on available API keys
    fn default() -> Self {
        if env::var(GeminiClient::KEY_NAME).is_ok()
            || std::fs::read_to_string(".env")
                .map_or(false, |content| content.contains(GeminiClient::KEY_NAME))
        {
            Self::Gemini
        } else {
            Self::Mock
        }
    }
}

impl ClientType {
    /// Parse client type from string (case insensitive)
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "mock" => Ok(Self::Mock),
            _ => Err(format!("Unknown client type: '{}'. Supported: gemini, mock", s)),
        }
    }
}

impl std::fmt::Display for ClientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientType::Gemini => write!(f, "Gemini"),
            ClientType::Mock => write!(f, "Mock"),
        }
    }
}

/// Flexible client that wraps any LowLevelClient and provides factory functions
#[derive(Debug, Clone)]
pub struct FlexibleClient {
    inner: Box<dyn LowLevelClient>,
}

impl FlexibleClient {
    /// Create a new FlexibleClient wrapping the given client
    pub fn new(client: Box<dyn LowLevelClient>) -> Self {
        Self { inner: client }
    }

    /// Create a FlexibleClient with a Gemini client
    pub fn gemini(config: GeminiConfig) -> Self {
        Self::new(Box::new(GeminiClient::new(config)))
    }

    /// Create a FlexibleClient with a mock and return the handle for scripting
    pub fn mock() -> (Self, Arc<super::mock::MockHandle>) {
        let (mock_client, handle) = super::mock::MockClient::new();
        (Self::new(Box::new(mock_client)), handle)
    }

    /// Convert into the inner boxed client
    pub fn into_inner(self) -> Box<dyn LowLevelClient> {
        self.inner
    }
}

#[async_trait]
impl LowLevelClient for FlexibleClient {
    async fn ask_raw(&self, prompt: String) -> Result<String, AIError> {
        self.inner.ask_raw(prompt).await
    }

    fn clone_box(&self) -> Box<dyn LowLevelClient> {
        Box::new(self.clone())
    }
}
