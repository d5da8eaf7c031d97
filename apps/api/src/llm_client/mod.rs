/// LLM Client: the single point of entry for all chat-completions calls.
///
/// No other module talks to the provider directly. Workflows depend on the
/// `LanguageModel` trait so tests can substitute a stub.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LlmConfig;

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// What the pipeline needs from a language model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Sends a system + user prompt in JSON mode and returns the raw message text.
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, LlmError>;

    /// Transcribes one base64 encoded JPEG page.
    async fn read_image(&self, encoded_jpeg: &str) -> Result<String, LlmError>;
}

/// Calls the model and deserializes its answer as `T`.
/// The prompt must instruct the model to return valid JSON.
pub async fn call_json<T: DeserializeOwned>(
    llm: &dyn LanguageModel,
    system: &str,
    user: &str,
) -> Result<T, LlmError> {
    let text = llm.complete_json(system, user).await?;
    serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    Text(&'a str),
    Parts(Vec<ContentPart<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if the model produced any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// OpenAI-compatible chat completions client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
    url: String,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let url = config.chat_completions_url();
        Ok(Self {
            client,
            config,
            url,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Makes a raw call to the chat completions endpoint.
    /// 429 and 5xx responses are retried `max_retries` times with exponential backoff.
    async fn call(&self, request_body: &ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        let attempts = self.config.max_retries + 1;
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                // 1s, 2s, 4s, ...
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1).min(6)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.url)
                .bearer_auth(&self.config.api_key)
                .json(request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat_response: ChatResponse = response.json().await?;

            if let Some(usage) = &chat_response.usage {
                debug!(
                    "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                    request_body.model, usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(chat_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: self.config.max_retries,
        }))
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(system),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(user),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: Some(self.config.temperature),
            seed: Some(self.config.seed),
            response_format: Some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let response = self.call(&request).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }

    async fn read_image(&self, encoded_jpeg: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.config.vision_model,
            messages: vec![ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: &self.config.vision_prompt,
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:image/jpeg;base64,{encoded_jpeg}"),
                        },
                    },
                ]),
            }],
            max_tokens: self.config.max_tokens,
            temperature: None,
            seed: None,
            response_format: None,
        };

        let response = self.call(&request).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct CannedModel(&'static str);

    #[async_trait]
    impl LanguageModel for CannedModel {
        async fn complete_json(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }

        async fn read_image(&self, _encoded_jpeg: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_vision_request_serializes_image_part() {
        let request = ChatRequest {
            model: "gpt-4o",
            messages: vec![ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text { text: "read" },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: "data:image/jpeg;base64,AAAA".to_string(),
                        },
                    },
                ]),
            }],
            max_tokens: 10,
            temperature: None,
            seed: None,
            response_format: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "gpt-4o",
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "text": "read"},
                        {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,AAAA"}}
                    ]
                }],
                "max_tokens": 10
            })
        );
    }

    #[test]
    fn test_text_request_carries_json_mode_and_seed() {
        let request = ChatRequest {
            model: "gpt-4o",
            messages: vec![ChatMessage {
                role: "system",
                content: MessageContent::Text("sys"),
            }],
            max_tokens: 4096,
            temperature: Some(0.0),
            seed: Some(12345),
            response_format: Some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["content"], "sys");
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["seed"], 12345);
    }

    #[test]
    fn test_chat_response_text_skips_blank_content() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "   "}}]
        }))
        .unwrap();
        assert!(response.text().is_none());

        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": "page one"}}],
            "usage": {"prompt_tokens": 5, "completion_tokens": 2}
        }))
        .unwrap();
        assert_eq!(response.text(), Some("page one"));
    }

    #[tokio::test]
    async fn test_call_json_strips_fences_before_parsing() {
        let llm = CannedModel("```json\n{\"answer\": 42}\n```");
        let value: serde_json::Value = call_json(&llm, "s", "u").await.unwrap();
        assert_eq!(value["answer"], 42);
    }

    #[tokio::test]
    async fn test_call_json_reports_parse_errors() {
        let llm = CannedModel("not json at all");
        let result = call_json::<serde_json::Value>(&llm, "s", "u").await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }
}
