use super::{ChatMessage, CompletionProvider, CompletionRequest};
use crate::config::{self, OpenAiConfig};
use crate::error::{Result, SousChefError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint
#[derive(Debug)]
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    timeout_seconds: u64,
}

impl OpenAiProvider {
    /// Build a provider from config, running the API key command
    pub fn from_config(config: &OpenAiConfig) -> Result<Self> {
        let api_key = config::run_secret_command(&config.api_key_command)?;
        Self::new(config, api_key)
    }

    pub fn new(config: &OpenAiConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| SousChefError::Completion(format!("Failed to create HTTP client: {}", e)))?;

        Ok(OpenAiProvider {
            client,
            api_key,
            endpoint: completions_endpoint(&config.base_url),
            model: config.model.clone(),
            timeout_seconds: config.timeout_seconds,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = ChatCompletionBody {
            model: &self.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            model = %self.model,
            max_tokens = request.max_tokens,
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SousChefError::CompletionTimeout(self.timeout_seconds)
                } else {
                    SousChefError::Completion(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SousChefError::CompletionStatus { status, body });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| SousChefError::Completion(format!("Failed to parse response: {}", e)))?;

        extract_content(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Join the configured base URL with the completions path
fn completions_endpoint(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

fn extract_content(response: ChatCompletionResponse) -> Result<String> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or(SousChefError::EmptyCompletion)?;

    if content.trim().is_empty() {
        return Err(SousChefError::EmptyCompletion);
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_endpoint() {
        assert_eq!(
            completions_endpoint("https://api.openai.com/v1"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            completions_endpoint("http://localhost:11434/v1/"),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let messages = vec![
            ChatMessage::system("You are a helpful sous chef."),
            ChatMessage::user("Pancakes?"),
        ];
        let body = ChatCompletionBody {
            model: "gpt-3.5-turbo",
            messages: &messages,
            max_tokens: 150,
            temperature: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Pancakes?");
        assert_eq!(json["max_tokens"], 150);
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_extract_content() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"1. Omelette"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(response).unwrap(), "1. Omelette");

        let empty: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(extract_content(empty), Err(SousChefError::EmptyCompletion)));

        let blank: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  \n"}}]}"#).unwrap();
        assert!(matches!(extract_content(blank), Err(SousChefError::EmptyCompletion)));
    }
}
