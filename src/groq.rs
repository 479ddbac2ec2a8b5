//! Groq API client for chat completions
//!
//! Direct LLM integration for the advisor's conversational answers.
//! Uses a long-lived reqwest::Client for connection pooling.

use crate::error::AdvisorError;
use crate::models::ChatMessage;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Persona and answer-style instructions sent as the system turn.
pub const SYSTEM_PROMPT: &str = "\
You are Wealth AI, an experienced Chartered Accountant who advises clients on \
personal finance, tax-saving strategies, and investments.

Answer in a professional, trustworthy, and concise manner.

Provide just the right balance: not too much detail to overwhelm, but not too \
little that it lacks clarity.

Structure responses in a neat, numbered or bulleted format.

Always suggest actionable, compliant advice based on Indian tax laws (e.g., \
Section 80C, 80D, capital gains, etc.) and general best practices in personal \
finance.

If a user asks something outside your scope, politely decline and suggest \
consulting a certified professional.

Maintain the tone of a seasoned CA speaking directly to their client.";

/// Seam between the advisor service and the model provider, so the service
/// can be tested with a scripted model.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> crate::Result<String>;
}

/// Reusable Groq client (connection-pooled)
pub struct GroqClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: GROQ_API_URL.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ChatModel for GroqClient {
    async fn complete(&self, messages: &[ChatMessage]) -> crate::Result<String> {
        if self.api_key.is_empty() {
            return Err(AdvisorError::ConfigError(
                "GROQ_API_KEY not configured".to_string(),
            ));
        }

        let request = CompletionRequest {
            model: &self.model,
            messages,
            temperature: 0.3,
            max_tokens: 1000,
            top_p: 0.9,
            stream: false,
        };

        info!(model = %self.model, "Calling Groq API");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Groq API request failed: {}", e);
                AdvisorError::LlmError(format!("Groq API error: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Groq API error response: {} - {}", status, error_text);
            return Err(AdvisorError::LlmError(format!(
                "Groq API error: {} - {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Groq response: {}", e);
            AdvisorError::LlmError(format!("Groq parse error: {}", e))
        })?;

        let answer = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AdvisorError::LlmError("Empty response from Groq".to_string()))?;

        if let Some(usage) = completion.usage {
            info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Groq response received"
            );
        }

        Ok(answer)
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
