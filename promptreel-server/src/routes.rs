use crate::config::ServerConfig;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use base64::Engine;
use promptreel_core::types::GenerationRequest;
use promptreel_core::wire::WireGenerationRequest;
use promptreel_engine::engine::{PollPolicy, PromptreelEngine};
use promptreel_engine::http::VeoVideoProvider;
use promptreel_engine::outcome::GenerationPhase;
use promptreel_providers::error::{GenerateError, user_facing_generate_error};
use promptreel_providers::veo::VeoConfig;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

pub const BUSY_MESSAGE: &str = "A video generation is already in progress.";

// Reference images arrive base64-encoded inside the JSON body; axum's 2 MB
// default would reject them.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub struct AppState {
    pub engine: PromptreelEngine,
    // try_lock'ed per request; holding it is what "a generation is
    // running" means.
    generate_gate: tokio::sync::Mutex<()>,
}

pub fn build_state(cfg: &ServerConfig) -> Arc<AppState> {
    let veo = VeoConfig::new(cfg.api_key.clone())
        .with_model(cfg.model.clone())
        .with_base_url(cfg.base_url.clone());

    let mut poll = PollPolicy::new().with_interval(cfg.poll_interval);
    if let Some(max) = cfg.max_poll_checks {
        poll = poll.with_max_checks(max);
    }

    Arc::new(AppState {
        engine: PromptreelEngine::new(Arc::new(VeoVideoProvider::new(veo))).with_poll_policy(poll),
        generate_gate: tokio::sync::Mutex::new(()),
    })
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/generate-video", post(generate_video))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

type ErrorReply = (StatusCode, Json<Value>);

fn error_reply(status: StatusCode, message: impl Into<String>) -> ErrorReply {
    (status, Json(json!({ "error": message.into() })))
}

fn failure_reply(err: GenerateError) -> ErrorReply {
    warn!(error = %err, "video generation failed");
    error_reply(
        StatusCode::INTERNAL_SERVER_ERROR,
        user_facing_generate_error(&err),
    )
}

async fn generate_video(
    State(state): State<Arc<AppState>>,
    Json(body): Json<WireGenerationRequest>,
) -> Result<impl IntoResponse, ErrorReply> {
    if body.number_of_videos == 0 || body.duration_seconds == 0 {
        return Err(error_reply(
            StatusCode::BAD_REQUEST,
            "numberOfVideos and durationSeconds must be at least 1",
        ));
    }

    // One generation at a time; overlapping calls are rejected outright
    // instead of racing each other.
    let Ok(_running) = state.generate_gate.try_lock() else {
        return Err(error_reply(StatusCode::CONFLICT, BUSY_MESSAGE));
    };

    let request =
        decode_request(body).map_err(|msg| error_reply(StatusCode::BAD_REQUEST, msg))?;

    info!(
        prompt_len = request.prompt.len(),
        videos = request.video_count,
        duration_secs = request.duration_seconds,
        "starting video generation"
    );

    let outcome = state
        .engine
        .run_to_completion_with_hook(&request, |phase| async move {
            if let GenerationPhase::Polling { check } = phase {
                info!(check, "polling video generation");
            }
        })
        .await
        .map_err(failure_reply)?;

    if outcome.job.media.len() > 1 {
        info!(
            generation = %outcome.generation,
            dropped = outcome.job.media.len() - 1,
            "several videos came back; returning the first"
        );
    }
    let Some(first) = outcome.job.media.first() else {
        return Err(failure_reply(GenerateError::EmptyResult));
    };

    let artifact = state
        .engine
        .fetch_artifact(first)
        .await
        .map_err(failure_reply)?;

    info!(
        generation = %outcome.generation,
        checks = outcome.checks,
        bytes = artifact.bytes.len(),
        "video generation complete"
    );

    Ok(([(header::CONTENT_TYPE, "video/mp4")], artifact.bytes))
}

/// Turns the wire body into a provider request. An empty `imageBytes`
/// string counts as no image. Uploads are forwarded as PNG regardless of
/// the original file type.
fn decode_request(body: WireGenerationRequest) -> Result<GenerationRequest, String> {
    let mut request = GenerationRequest::new(body.prompt)
        .with_video_count(body.number_of_videos)
        .with_duration_seconds(body.duration_seconds);

    if let Some(ratio) = body.aspect_ratio {
        request = request.with_aspect_ratio(ratio);
    }

    if let Some(encoded) = body.image_bytes.as_deref().filter(|s| !s.is_empty()) {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| format!("imageBytes is not valid base64: {e}"))?;
        request = request.with_reference_image(bytes, "image/png");
    }

    Ok(request)
}
