//! Lifeline gateway: serves the single-page form and the assist/narration
//! JSON API. All API keys live here; the frontend is a stateless client.

mod index;

use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lifeline_core::{
    AssistOutcome, GatewayConfig, GenerationClient, LiveGeneration, LlmMode, MockGeneration,
    Narrator, Orchestrator, SilentTts, SpeechClient, TranslateTts,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
struct AppState {
    config: Arc<GatewayConfig>,
    orchestrator: Arc<Orchestrator>,
    narrator: Arc<Narrator>,
}

#[derive(Deserialize)]
struct AssistRequest {
    report: String,
}

#[derive(Deserialize)]
struct NarrateRequest {
    text: String,
}

async fn index_page(State(state): State<AppState>) -> Response {
    if !state.config.frontend_enabled {
        return (StatusCode::NOT_FOUND, "frontend disabled").into_response();
    }
    Html(index::INDEX_HTML).into_response()
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "app_name": state.config.app_name,
        "version": env!("CARGO_PKG_VERSION"),
        "llm_mode": state.config.llm_mode,
        "time": chrono::Utc::now(),
    }))
}

async fn reference() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "emergency_numbers": lifeline_core::reference::EMERGENCY_NUMBERS,
        "first_aid_checklist": lifeline_core::reference::FIRST_AID_CHECKLIST,
    }))
}

/// One-shot assist: every remote failure ends in a rendered message, never a
/// raw 5xx from this handler.
async fn assist(
    State(state): State<AppState>,
    Json(req): Json<AssistRequest>,
) -> Response {
    match state.orchestrator.assist(&req.report).await {
        Ok(AssistOutcome::Guidance(guidance)) => Json(serde_json::json!({
            "status": "guidance",
            "guidance": guidance.text,
            "generated_at": guidance.generated_at,
        }))
        .into_response(),
        Ok(AssistOutcome::RateLimited { advisory }) => Json(serde_json::json!({
            "status": "rate_limited",
            "message": advisory,
        }))
        .into_response(),
        Ok(AssistOutcome::Degraded { message, checklist }) => Json(serde_json::json!({
            "status": "degraded",
            "message": message,
            "checklist": checklist,
        }))
        .into_response(),
        Err(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "status": "empty_report",
                "message": err.to_string(),
            })),
        )
            .into_response(),
    }
}

/// Narration is non-fatal: a failure here is logged as a warning and the
/// textual guidance (a separate, already-answered request) stays usable.
async fn narrate(
    State(state): State<AppState>,
    Json(req): Json<NarrateRequest>,
) -> Response {
    match state.narrator.narrate(&req.text).await {
        Ok(clip) => (
            [(header::CONTENT_TYPE, "audio/mpeg")],
            clip.into_bytes(),
        )
            .into_response(),
        Err(err) => {
            tracing::warn!(target: "lifeline::gateway", "narration failed: {}", err);
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "status": "narration_failed",
                    "message": format!("Audio narration is unavailable: {}", err),
                })),
            )
                .into_response()
        }
    }
}

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(tower_http::cors::Any)
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/", get(index_page))
        .route("/api/v1/health", get(health))
        .route("/api/v1/reference", get(reference))
        .route("/api/v1/assist", post(assist))
        .route("/api/v1/narrate", post(narrate))
        .layer(cors)
        .with_state(state)
}

/// Wire the clients for the configured mode. Live mode with a missing or
/// unusable key is a startup error, not a per-request surprise.
fn build_state(config: GatewayConfig) -> Result<AppState, String> {
    let (generation, speech): (Arc<dyn GenerationClient>, Arc<dyn SpeechClient>) =
        match config.llm_mode {
            LlmMode::Live => (
                Arc::new(LiveGeneration::from_config(&config).map_err(|e| e.to_string())?),
                Arc::new(TranslateTts::new(config.tts_url.clone()).map_err(|e| e.to_string())?),
            ),
            LlmMode::Mock => (Arc::new(MockGeneration), Arc::new(SilentTts)),
        };

    Ok(AppState {
        orchestrator: Arc::new(Orchestrator::new(generation)),
        narrator: Arc::new(Narrator::new(speech)),
        config: Arc::new(config),
    })
}

#[tokio::main]
async fn main() {
    // Load .env first: the gateway holds the LLM key, the frontend never does.
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[lifeline-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env();
    if config.llm_mode == LlmMode::Mock {
        tracing::info!("LIFELINE_LLM_MODE=mock: guidance and narration are deterministic stand-ins");
    }

    let port = config.port;
    let state = match build_state(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("startup failed: {}", e);
            std::process::exit(1);
        }
    };

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("lifeline-gateway listening on http://{}", addr);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app(state)).await {
        tracing::error!("server error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use lifeline_core::GenerationError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct FakeGeneration {
        calls: Arc<AtomicUsize>,
        result: fn() -> Result<String, GenerationError>,
    }

    #[async_trait]
    impl GenerationClient for FakeGeneration {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn test_app(result: fn() -> Result<String, GenerationError>) -> (Router, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = AppState {
            config: Arc::new(GatewayConfig::default()),
            orchestrator: Arc::new(Orchestrator::new(Arc::new(FakeGeneration {
                calls: calls.clone(),
                result,
            }))),
            narrator: Arc::new(Narrator::new(Arc::new(SilentTts))),
        };
        (app(state), calls)
    }

    async fn json_body(res: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_reports_identity_and_mode() {
        let (app, _) = test_app(|| Ok("ok".to_string()));
        let res = app
            .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = json_body(res.into_response()).await;
        assert_eq!(json["app_name"], "Lifeline Emergency Assistant");
        assert_eq!(json["llm_mode"], "mock");
    }

    #[tokio::test]
    async fn reference_serves_numbers_and_checklist() {
        let (app, _) = test_app(|| Ok("ok".to_string()));
        let res = app
            .oneshot(Request::builder().uri("/api/v1/reference").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = json_body(res.into_response()).await;
        assert!(json["first_aid_checklist"].as_str().unwrap().contains("emergency number"));
        assert!(json["emergency_numbers"].as_array().unwrap().iter().any(|n| n["number"] == "911"));
    }

    #[tokio::test]
    async fn assist_returns_guidance_verbatim() {
        let (app, calls) = test_app(|| Ok("STEP 1: evacuate...".to_string()));
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/assist")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"report":"house fire in kitchen"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = json_body(res.into_response()).await;
        assert_eq!(json["status"], "guidance");
        assert_eq!(json["guidance"], "STEP 1: evacuate...");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_report_is_422_with_no_remote_call() {
        let (app, calls) = test_app(|| Ok("unused".to_string()));
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/assist")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"report":"   "}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = json_body(res.into_response()).await;
        assert_eq!(json["status"], "empty_report");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rate_limited_generation_renders_advisory() {
        let (app, _) = test_app(|| {
            Err(GenerationError::RateLimited("429".to_string()))
        });
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/assist")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"report":"car accident"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = json_body(res.into_response()).await;
        assert_eq!(json["status"], "rate_limited");
        assert_eq!(json["message"], lifeline_core::RATE_LIMIT_ADVISORY);
        assert!(json["message"].as_str().unwrap().to_lowercase().contains("rate limit"));
    }

    #[tokio::test]
    async fn failed_generation_degrades_with_checklist() {
        let (app, _) = test_app(|| {
            Err(GenerationError::Transport("connection refused".to_string()))
        });
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/assist")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"report":"someone fainted"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json = json_body(res.into_response()).await;
        assert_eq!(json["status"], "degraded");
        assert!(json["message"].as_str().unwrap().contains("connection refused"));
        assert!(!json["checklist"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn narrate_returns_audio_bytes() {
        let (app, _) = test_app(|| Ok("ok".to_string()));
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/narrate")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"text":"stay calm"}"#))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get(header::CONTENT_TYPE).unwrap(),
            "audio/mpeg"
        );
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(!bytes.is_empty());
    }

    #[tokio::test]
    async fn narrate_failure_is_a_rendered_message_not_a_crash() {
        struct RefusingTts;

        #[async_trait]
        impl lifeline_core::SpeechClient for RefusingTts {
            async fn synthesize_to(
                &self,
                _text: &str,
                _lang: &str,
                _out: &std::path::Path,
            ) -> Result<(), lifeline_core::NarrationError> {
                Err(lifeline_core::NarrationError::Synthesis("tts offline".to_string()))
            }
        }

        let state = AppState {
            config: Arc::new(GatewayConfig::default()),
            orchestrator: Arc::new(Orchestrator::new(Arc::new(MockGeneration))),
            narrator: Arc::new(Narrator::new(Arc::new(RefusingTts))),
        };
        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/narrate")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"text":"stay calm"}"#))
            .unwrap();
        let res = app(state).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
        let json = json_body(res.into_response()).await;
        assert_eq!(json["status"], "narration_failed");
        assert!(json["message"].as_str().unwrap().contains("tts offline"));
    }

    #[tokio::test]
    async fn index_serves_the_form() {
        let (app, _) = test_app(|| Ok("ok".to_string()));
        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Describe your emergency"));
    }
}
