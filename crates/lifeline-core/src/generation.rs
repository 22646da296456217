//! Generation clients: send the assist prompt to an LLM and return generated
//! text, with remote failures classified into typed variants.
//!
//! `LiveGeneration` talks to an OpenAI-compatible chat-completions endpoint
//! (OpenRouter, OpenAI, Gemini-via-OpenRouter). `MockGeneration` is the
//! deterministic offline implementation used without a key.

use crate::config::GatewayConfig;
use crate::error::GenerationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Capability seam for text generation. One call per orchestrator invocation;
/// implementations never retry.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, system: &str, user: &str) -> Result<String, GenerationError>;
}

// OpenAI-compatible request/response structures
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

/// Live chat-completions client with bearer auth and an explicit timeout.
pub struct LiveGeneration {
    api_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl LiveGeneration {
    /// Build from config. Errors when no API key is configured, so live mode
    /// fails at startup rather than on the first emergency request.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GenerationError> {
        let api_key = config
            .llm_api_key
            .clone()
            .ok_or_else(|| {
                GenerationError::Config(
                    "live mode requires LIFELINE_LLM_API_KEY (or GEMINI_API_KEY / OPENROUTER_API_KEY)"
                        .to_string(),
                )
            })?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;
        Ok(Self {
            api_url: config.llm_api_url.clone(),
            api_key,
            model: config.llm_model.clone(),
            client,
        })
    }

    /// Quota-exhaustion markers some providers return with a non-429 status.
    fn body_signals_exhaustion(body: &str) -> bool {
        body.contains("RESOURCE_EXHAUSTED") || body.to_ascii_lowercase().contains("quota")
    }
}

#[async_trait]
impl GenerationClient for LiveGeneration {
    async fn generate(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let request_body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: Some(0.3),
            max_tokens: Some(1024),
        };

        tracing::debug!(target: "lifeline::generation", model = %self.model, "dispatching assist prompt");

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(target: "lifeline::generation", status = %status, "generation API error: {}", detail);
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS
                || Self::body_signals_exhaustion(&detail)
            {
                return Err(GenerationError::RateLimited(detail));
            }
            return Err(GenerationError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let text = chat_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| GenerationError::Transport("response carried no choices".to_string()))?;

        Ok(text)
    }
}

/// Deterministic offline guidance. Never calls the network; keeps demos and
/// keyless setups working end to end.
#[derive(Debug, Default)]
pub struct MockGeneration;

#[async_trait]
impl GenerationClient for MockGeneration {
    async fn generate(&self, _system: &str, user: &str) -> Result<String, GenerationError> {
        let mut chars = user.chars();
        let mut preview: String = chars.by_ref().take(80).collect();
        if chars.next().is_some() {
            preview.push('…');
        }
        Ok(format!(
            "[Generated – Mock LLM]\n\nBased on the report ({}):\n\n\
             Immediate actions:\n- Make sure you and the person are out of danger.\n- Call your local emergency number now.\n\n\
             Steps:\n1. Stay calm and stay with the person.\n2. Check responsiveness and breathing.\n3. Follow the dispatcher's instructions.\n\n\
             Warnings:\n- Do not move someone with a suspected head, neck, or back injury.\n\n\
             Escalate immediately if the person is unresponsive, not breathing, or bleeding heavily.",
            preview
        ))
    }
}
