//! OpenRouter gateway adapter
//!
//! Implements [`LlmGateway`] against the OpenAI-compatible
//! `POST {base_url}/chat/completions` endpoint. Every pipeline step is one
//! stateless completion: a system message and a user message, sampled at the
//! configured temperature, answered by the first choice's message content.

use crate::config::FileLlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use switchboard_application::{ChatRequest, GatewayError, LlmGateway};
use tracing::debug;

/// HTTP client for OpenRouter (or any OpenAI-compatible endpoint)
#[derive(Debug)]
pub struct OpenRouterGateway {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
}

impl OpenRouterGateway {
    /// Builds the gateway from the `[llm]` config section.
    ///
    /// A missing API key is not an error here: requests are sent without
    /// authentication and the upstream rejection surfaces as
    /// [`GatewayError::RequestFailed`].
    pub fn new(config: &FileLlmConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| {
                GatewayError::ConnectionError(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmGateway for OpenRouterGateway {
    async fn complete(&self, request: ChatRequest) -> Result<String, GatewayError> {
        let payload = CompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: request.system,
                },
                Message {
                    role: "user".to_string(),
                    content: request.user,
                },
            ],
            temperature: self.temperature,
        };

        let mut http_request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&payload);
        if let Some(api_key) = &self.api_key {
            http_request = http_request.bearer_auth(api_key);
        }

        let response = http_request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        let choice = completion.choices.into_iter().next().ok_or_else(|| {
            GatewayError::MalformedResponse("completion has no choices".to_string())
        })?;

        debug!("Completion received from {}", self.model);
        Ok(choice.message.content)
    }
}

fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if error.is_connect() {
        GatewayError::ConnectionError(error.to_string())
    } else {
        GatewayError::RequestFailed(error.to_string())
    }
}

// OpenAI-compatible request/response types
#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn config(base_url: String, api_key: Option<&str>) -> FileLlmConfig {
        FileLlmConfig {
            base_url,
            model: "openai/gpt-4o".to_string(),
            api_key: api_key.map(str::to_string),
            temperature: 0.7,
            request_timeout_secs: 10,
        }
    }

    #[tokio::test]
    async fn test_complete_returns_assistant_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-or-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "agent2"
                    },
                    "finish_reason": "stop"
                }]
            }"#,
            )
            .create_async()
            .await;

        let gateway = OpenRouterGateway::new(&config(server.url(), Some("sk-or-test"))).unwrap();
        let reply = gateway
            .complete(ChatRequest::new("sys", "ask"))
            .await
            .unwrap();

        assert_eq!(reply, "agent2");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_sends_model_and_messages() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "openai/gpt-4o",
                "messages": [
                    {"role": "system", "content": "You review agent answers."},
                    {"role": "user", "content": "judge this"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"content": "approved"}}]}"#)
            .create_async()
            .await;

        let gateway = OpenRouterGateway::new(&config(server.url(), Some("sk-or-test"))).unwrap();
        gateway
            .complete(ChatRequest::new("You review agent answers.", "judge this"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_api_key_omits_authorization() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"content": "ok"}}]}"#)
            .create_async()
            .await;

        let gateway = OpenRouterGateway::new(&config(server.url(), None)).unwrap();
        gateway.complete(ChatRequest::new("sys", "ask")).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_request_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let gateway = OpenRouterGateway::new(&config(server.url(), Some("sk-or-test"))).unwrap();
        let error = gateway
            .complete(ChatRequest::new("sys", "ask"))
            .await
            .unwrap_err();

        match error {
            GatewayError::RequestFailed(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("upstream exploded"));
            }
            other => panic!("expected RequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_malformed_response() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let gateway = OpenRouterGateway::new(&config(server.url(), Some("sk-or-test"))).unwrap();
        let error = gateway
            .complete(ChatRequest::new("sys", "ask"))
            .await
            .unwrap_err();

        assert!(matches!(error, GatewayError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_malformed_response() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("this is not json")
            .create_async()
            .await;

        let gateway = OpenRouterGateway::new(&config(server.url(), Some("sk-or-test"))).unwrap();
        let error = gateway
            .complete(ChatRequest::new("sys", "ask"))
            .await
            .unwrap_err();

        assert!(matches!(error, GatewayError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url_is_tolerated() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"content": "ok"}}]}"#)
            .create_async()
            .await;

        let base_url = format!("{}/", server.url());
        let gateway = OpenRouterGateway::new(&config(base_url, Some("sk-or-test"))).unwrap();
        gateway.complete(ChatRequest::new("sys", "ask")).await.unwrap();

        mock.assert_async().await;
    }
}
