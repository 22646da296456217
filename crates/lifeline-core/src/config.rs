//! Gateway configuration loaded from `.env` / environment.
//!
//! All keys stay in the backend: the frontend is a stateless client and never
//! receives or sends API keys.

use serde::{Deserialize, Serialize};

const ENV_LLM_MODE: &str = "LIFELINE_LLM_MODE";
const ENV_LLM_API_URL: &str = "LIFELINE_LLM_API_URL";
const ENV_LLM_API_KEY: &str = "LIFELINE_LLM_API_KEY";
const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
const ENV_OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";
const ENV_LLM_MODEL: &str = "LIFELINE_LLM_MODEL";
const ENV_TTS_URL: &str = "LIFELINE_TTS_URL";
const ENV_PORT: &str = "LIFELINE_PORT";
const ENV_APP_NAME: &str = "LIFELINE_APP_NAME";
const ENV_FRONTEND_ENABLED: &str = "LIFELINE_FRONTEND_ENABLED";

const DEFAULT_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_MODEL: &str = "google/gemini-flash-1.5";
const DEFAULT_TTS_URL: &str = "https://translate.google.com/translate_tts";
const DEFAULT_PORT: u16 = 8080;

/// Mode for LLM invocation: mock (deterministic offline guidance) or live
/// (calls the external API).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmMode {
    #[default]
    Mock,
    Live,
}

impl LlmMode {
    fn from_env() -> Self {
        match std::env::var(ENV_LLM_MODE).as_deref() {
            Ok("live") => LlmMode::Live,
            _ => LlmMode::Mock,
        }
    }
}

/// Configuration loaded from environment.
///
/// | Env | Default | Description |
/// |-----|---------|-------------|
/// | LIFELINE_LLM_MODE | mock | "mock" \| "live" — whether to call the external generation API. |
/// | LIFELINE_LLM_API_URL | OpenRouter chat completions | OpenAI-compatible endpoint. |
/// | LIFELINE_LLM_API_KEY | — | Bearer key; GEMINI_API_KEY and OPENROUTER_API_KEY are accepted as fallbacks. |
/// | LIFELINE_LLM_MODEL | google/gemini-flash-1.5 | Model handle sent with each request. |
/// | LIFELINE_TTS_URL | translate.google.com/translate_tts | Speech synthesis endpoint. |
/// | LIFELINE_PORT | 8080 | Gateway listen port. |
/// | LIFELINE_APP_NAME | Lifeline Emergency Assistant | Reported by /api/v1/health and the page title. |
/// | LIFELINE_FRONTEND_ENABLED | true | Serve the single-page form at `/`. |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub app_name: String,
    pub port: u16,
    pub llm_mode: LlmMode,
    pub llm_api_url: String,
    /// Bearer key for the generation API. Required in live mode only.
    #[serde(skip_serializing)]
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub tts_url: String,
    pub frontend_enabled: bool,
}

impl GatewayConfig {
    /// Load from environment. Unset or invalid values fall back to the
    /// defaults documented on the struct.
    pub fn from_env() -> Self {
        let llm_api_key = std::env::var(ENV_LLM_API_KEY)
            .or_else(|_| std::env::var(ENV_GEMINI_API_KEY))
            .or_else(|_| std::env::var(ENV_OPENROUTER_API_KEY))
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Self {
            app_name: std::env::var(ENV_APP_NAME)
                .unwrap_or_else(|_| "Lifeline Emergency Assistant".to_string()),
            port: std::env::var(ENV_PORT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            llm_mode: LlmMode::from_env(),
            llm_api_url: std::env::var(ENV_LLM_API_URL)
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            llm_api_key,
            llm_model: std::env::var(ENV_LLM_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            tts_url: std::env::var(ENV_TTS_URL).unwrap_or_else(|_| DEFAULT_TTS_URL.to_string()),
            frontend_enabled: match std::env::var(ENV_FRONTEND_ENABLED).as_deref() {
                Ok("false") | Ok("0") => false,
                _ => true,
            },
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            app_name: "Lifeline Emergency Assistant".to_string(),
            port: DEFAULT_PORT,
            llm_mode: LlmMode::Mock,
            llm_api_url: DEFAULT_API_URL.to_string(),
            llm_api_key: None,
            llm_model: DEFAULT_MODEL.to_string(),
            tts_url: DEFAULT_TTS_URL.to_string(),
            frontend_enabled: true,
        }
    }
}
