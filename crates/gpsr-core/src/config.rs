//! Configuration for the chat-completion endpoint.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_TOP_P: f32 = 0.95;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Sampling parameters sent with a chat-completion request.
///
/// The defaults match the rehearsal setup; any call may override them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_top_p() -> f32 {
    DEFAULT_TOP_P
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

/// Connection settings for an OpenAI-compatible chat endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Full URL of the chat completions endpoint.
    pub endpoint: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    #[serde(default)]
    pub sampling: SamplingOptions,
}

impl LlmConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            sampling: SamplingOptions::default(),
        }
    }

    /// Builds the endpoint URL from a host and port.
    pub fn for_host(host: &str, port: u16, api_key: impl Into<String>) -> Self {
        Self::new(format!("http://{host}:{port}/v1/chat/completions"), api_key)
    }

    /// Overrides the default sampling parameters.
    pub fn with_sampling(mut self, sampling: SamplingOptions) -> Self {
        self.sampling = sampling;
        self
    }

    /// Loads connection settings from `GPSR_LLM_URL` / `GPSR_LLM_API_KEY`.
    ///
    /// Returns `None` when no endpoint URL is configured.
    pub fn try_from_env() -> Option<Self> {
        let endpoint = std::env::var("GPSR_LLM_URL").ok()?;
        let api_key = std::env::var("GPSR_LLM_API_KEY").unwrap_or_default();
        Some(Self::new(endpoint, api_key))
    }
}
