//! Stateless protocol wrapper around one OpenAI-compatible chat endpoint.

use gpsr_core::config::{LlmConfig, SamplingOptions};
use gpsr_core::error::{GpsrError, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Client for a single chat-completion endpoint.
///
/// One outbound request per call, no retries, no state shared between
/// calls. Callers decide whether a failed call is worth retrying.
#[derive(Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    defaults: SamplingOptions,
}

impl ChatClient {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            defaults: config.sampling,
        }
    }

    /// Sends one request with the configured sampling defaults.
    pub async fn complete(&self, system: &str, user_turns: &[&str]) -> Result<String> {
        self.complete_with(system, user_turns, self.defaults).await
    }

    /// Sends one request: a system message followed by one user message
    /// per entry in `user_turns`, in order.
    pub async fn complete_with(
        &self,
        system: &str,
        user_turns: &[&str],
        sampling: SamplingOptions,
    ) -> Result<String> {
        let body = ChatCompletionRequest::new(system, user_turns, sampling);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|err| GpsrError::transport(format!("chat endpoint unreachable: {err}")))?;

        check_status(response.status())?;

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            GpsrError::protocol(format!("malformed chat completion response: {err}"))
        })?;

        extract_reply(parsed)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    max_tokens: u32,
    top_p: f32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(system: &'a str, user_turns: &[&'a str], sampling: SamplingOptions) -> Self {
        let mut messages = Vec::with_capacity(user_turns.len() + 1);
        messages.push(ChatMessage {
            role: "system",
            content: system,
        });
        for turn in user_turns {
            messages.push(ChatMessage {
                role: "user",
                content: turn,
            });
        }
        Self {
            max_tokens: sampling.max_tokens,
            top_p: sampling.top_p,
            temperature: sampling.temperature,
            messages,
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

fn check_status(status: StatusCode) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }
    let reason = status.canonical_reason().unwrap_or("unrecognized status");
    Err(GpsrError::transport_status(status.as_u16(), reason))
}

fn extract_reply(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GpsrError::protocol("chat completion carried no reply content"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_puts_system_first_then_user_turns_in_order() {
        let body = ChatCompletionRequest::new(
            "you are a paraphraser",
            &["first task", "second task"],
            SamplingOptions::default(),
        );
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["temperature"], 0.9);
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "you are a paraphraser");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "first task");
        assert_eq!(messages[2]["content"], "second task");
    }

    #[test]
    fn extract_reply_takes_first_choice() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"content": "- a\n- b\n- c"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_reply(response).unwrap(), "- a\n- b\n- c");
    }

    #[test]
    fn missing_content_is_a_protocol_error() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {}}]}"#).unwrap();
        let err = extract_reply(response).unwrap_err();
        assert!(matches!(err, GpsrError::Protocol(_)));
    }

    #[test]
    fn non_success_status_maps_to_a_transport_error() {
        let err = check_status(StatusCode::SERVICE_UNAVAILABLE).unwrap_err();
        assert_eq!(
            err,
            GpsrError::Transport {
                status: Some(503),
                message: "Service Unavailable".to_string(),
            }
        );
        assert!(check_status(StatusCode::UNAUTHORIZED).is_err());
    }

    #[test]
    fn success_status_passes_the_check() {
        assert!(check_status(StatusCode::OK).is_ok());
        assert!(check_status(StatusCode::CREATED).is_ok());
    }

    #[test]
    fn empty_choices_is_a_protocol_error() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(extract_reply(response).is_err());
    }
}
