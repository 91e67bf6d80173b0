use super::state::AppState;
use crate::assistant::{summarize, Message};
use crate::media::{MediaBackendFactory, MediaConstraints, MediaStreamSource};
use crate::session::{CaptureSession, RandomDetector, SessionConfig, SessionStats};
use crate::signs;
use crate::subjects;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,

    /// Detection interval in milliseconds (default from config)
    pub detect_interval_ms: Option<u64>,

    /// Start the detection loop together with capture
    pub auto_detect: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct StopSessionResponse {
    pub session_id: String,
    pub status: String,
    pub stats: SessionStats,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ConvertResponse {
    pub signs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Session Handlers
// ============================================================================

/// POST /sessions/start
/// Create and start a new capture session
pub async fn start_session(
    State(state): State<AppState>,
    Json(req): Json<StartSessionRequest>,
) -> impl IntoResponse {
    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("capture-{}", uuid::Uuid::new_v4()));

    info!("Starting capture session: {}", session_id);

    let capture_cfg = &state.config.capture;
    let config = SessionConfig {
        session_id: session_id.clone(),
        detect_interval: Duration::from_millis(
            req.detect_interval_ms.unwrap_or(capture_cfg.detect_interval_ms),
        ),
        history_limit: capture_cfg.history_limit,
        auto_detect: req.auto_detect.unwrap_or(false),
    };

    let constraints = MediaConstraints {
        frame_interval_ms: capture_cfg.frame_interval_ms,
        ..MediaConstraints::default()
    };

    let backend = match MediaBackendFactory::create(MediaStreamSource::Synthetic, constraints) {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to create media backend: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to create media backend: {}", e),
                }),
            )
                .into_response();
        }
    };

    let detector = Box::new(RandomDetector::new(capture_cfg.detect_probability));
    let session = Arc::new(CaptureSession::new(
        config,
        backend,
        detector,
        state.notifier.clone(),
    ));

    // Reserve the id before starting: a concurrent request with the
    // same id must see the conflict, never a second pipeline.
    {
        let mut sessions = state.sessions.write().await;
        if sessions.contains_key(&session_id) {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: format!("Session {} already exists", session_id),
                }),
            )
                .into_response();
        }
        sessions.insert(session_id.clone(), Arc::clone(&session));
    }

    if let Err(e) = session.start().await {
        error!("Failed to start capture: {}", e);
        state.sessions.write().await.remove(&session_id);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to start capture: {}", e),
            }),
        )
            .into_response();
    }

    info!("Capture session registered: {}", session.session_id());

    (
        StatusCode::OK,
        Json(StartSessionResponse {
            session_id: session_id.clone(),
            status: "capturing".to_string(),
            message: format!("Capture started for session {}", session_id),
        }),
    )
        .into_response()
}

/// POST /sessions/:session_id/stop
/// Stop a capture session and release its stream
pub async fn stop_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    info!("Stopping capture session: {}", session_id);

    let session = {
        let mut sessions = state.sessions.write().await;
        sessions.remove(&session_id)
    };

    match session {
        Some(session) => match session.stop().await {
            Ok(()) => {
                let stats = session.stats().await;
                (
                    StatusCode::OK,
                    Json(StopSessionResponse {
                        session_id,
                        status: "stopped".to_string(),
                        stats,
                    }),
                )
                    .into_response()
            }
            Err(e) => {
                error!("Failed to stop capture: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to stop capture: {}", e),
                    }),
                )
                    .into_response()
            }
        },
        None => session_not_found(&session_id),
    }
}

/// POST /sessions/:session_id/reset
/// Stop the session and clear its detection history
pub async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => match session.reset().await {
            Ok(()) => {
                state
                    .notifier
                    .info("Session reset", "All detection history has been cleared");
                (StatusCode::OK, Json(json!({ "status": "reset" }))).into_response()
            }
            Err(e) => {
                error!("Failed to reset session: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Failed to reset session: {}", e),
                    }),
                )
                    .into_response()
            }
        },
        None => session_not_found(&session_id),
    }
}

/// POST /sessions/:session_id/detection/start
pub async fn start_detection(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => match session.start_detection().await {
            Ok(()) => (StatusCode::OK, Json(json!({ "status": "detecting" }))).into_response(),
            Err(e) => {
                state
                    .notifier
                    .error("Camera not active", "Please start the camera first");
                (
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: e.to_string(),
                    }),
                )
                    .into_response()
            }
        },
        None => session_not_found(&session_id),
    }
}

/// POST /sessions/:session_id/detection/stop
pub async fn stop_detection(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => {
            session.stop_detection().await;
            (StatusCode::OK, Json(json!({ "status": "paused" }))).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/status
pub async fn session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => (StatusCode::OK, Json(session.stats().await)).into_response(),
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/history
/// Detection history, newest first
pub async fn session_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let sessions = state.sessions.read().await;

    match sessions.get(&session_id) {
        Some(session) => (StatusCode::OK, Json(session.history().await)).into_response(),
        None => session_not_found(&session_id),
    }
}

fn session_not_found(session_id: &str) -> axum::response::Response {
    error!("Session {} not found", session_id);
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Session {} not found", session_id),
        }),
    )
        .into_response()
}

// ============================================================================
// Assistant Handlers
// ============================================================================

/// POST /chat
/// Send a prompt to the assistant and record both sides
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    if req.prompt.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Prompt must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    {
        let mut conversation = state.conversation.lock().await;
        conversation.push(Message::user(req.prompt.clone()));
    }

    match state.assistant.send_prompt(&req.prompt).await {
        Ok(reply) => {
            let mut conversation = state.conversation.lock().await;
            conversation.push(Message::assistant(reply.clone()));
            (StatusCode::OK, Json(ChatResponse { reply })).into_response()
        }
        Err(e) => {
            error!("Assistant failed: {}", e);
            state.notifier.error(
                "Error",
                "Failed to get a response from the AI. Please try again.",
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Assistant failed: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /chat/history
pub async fn chat_history(State(state): State<AppState>) -> impl IntoResponse {
    let conversation = state.conversation.lock().await;
    (StatusCode::OK, Json(conversation.messages().to_vec())).into_response()
}

/// POST /chat/clear
/// Start a new conversation
pub async fn chat_clear(State(state): State<AppState>) -> impl IntoResponse {
    let mut conversation = state.conversation.lock().await;
    conversation.clear();
    state.notifier.info("Chat Cleared", "Started a new conversation");
    (StatusCode::OK, Json(json!({ "status": "cleared" }))).into_response()
}

/// POST /tools/summarize
pub async fn summarize_text(Json(req): Json<TextRequest>) -> impl IntoResponse {
    match summarize(&req.text) {
        Ok(summary) => (StatusCode::OK, Json(json!({ "summary": summary }))).into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

// ============================================================================
// Sign Language Handlers
// ============================================================================

/// POST /signs/convert
/// Convert text to its sign sequence (no playback)
pub async fn convert_signs(Json(req): Json<TextRequest>) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No text to convert".to_string(),
            }),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(ConvertResponse {
            signs: signs::transcribe(&req.text),
        }),
    )
        .into_response()
}

/// POST /signs/play
/// Convert text, load it into the shared player, and start playback
pub async fn play_signs(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        state
            .notifier
            .error("No text to convert", "Please enter some text first");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No text to convert".to_string(),
            }),
        )
            .into_response();
    }

    let total = state.player.load(signs::transcribe(&req.text)).await;
    state.player.play().await;

    (
        StatusCode::OK,
        Json(json!({ "status": "playing", "total": total })),
    )
        .into_response()
}

/// POST /signs/stop
pub async fn stop_signs(State(state): State<AppState>) -> impl IntoResponse {
    state.player.stop().await;
    (StatusCode::OK, Json(json!({ "status": "stopped" }))).into_response()
}

/// GET /signs/playback
/// Current playback position and the loaded sequence
pub async fn playback_state(State(state): State<AppState>) -> impl IntoResponse {
    let playback = state.player.state();
    let sequence = state.player.sequence().await;
    let current = sequence.get(playback.cursor).cloned();

    (
        StatusCode::OK,
        Json(json!({
            "playing": playback.playing,
            "cursor": playback.cursor,
            "total": playback.total,
            "current": current,
            "sequence": sequence,
        })),
    )
        .into_response()
}

/// POST /signs/copy
/// Write the joined sign sequence to the clipboard collaborator
pub async fn copy_signs(State(state): State<AppState>) -> impl IntoResponse {
    let sequence = state.player.sequence().await;
    if sequence.is_empty() {
        state
            .notifier
            .error("Nothing to copy", "Convert text to signs first");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Nothing to copy".to_string(),
            }),
        )
            .into_response();
    }

    match state.clipboard.write_text(&sequence.join("")) {
        Ok(()) => {
            state.notifier.info("Copied!", "Sign symbols copied to clipboard");
            (StatusCode::OK, Json(json!({ "status": "copied" }))).into_response()
        }
        Err(e) => {
            state.notifier.error("Failed to copy", e.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to copy: {}", e),
                }),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Speech Handlers
// ============================================================================

/// POST /speech/listen/start
pub async fn start_listening(State(state): State<AppState>) -> impl IntoResponse {
    match state.listening.start().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "listening" }))).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// POST /speech/listen/stop
pub async fn stop_listening(State(state): State<AppState>) -> impl IntoResponse {
    match state.listening.stop().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "stopped" }))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /speech/transcript
pub async fn transcript(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "listening": state.listening.is_listening(),
            "transcript": state.listening.transcript().await,
        })),
    )
        .into_response()
}

/// POST /speech/speak
pub async fn speak(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> impl IntoResponse {
    if req.text.trim().is_empty() {
        state
            .notifier
            .error("No text to speak", "Please enter or generate text first");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No text to speak".to_string(),
            }),
        )
            .into_response();
    }

    match state.speaker.speak(&req.text).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "speaking" }))).into_response(),
        Err(e) => {
            state.notifier.error("Speech error", e.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /speech/speak/cancel
pub async fn cancel_speaking(State(state): State<AppState>) -> impl IntoResponse {
    match state.speaker.cancel().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "cancelled" }))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

// ============================================================================
// Subject Handlers
// ============================================================================

/// GET /subjects
pub async fn list_subjects() -> impl IntoResponse {
    (StatusCode::OK, Json(subjects::SUBJECTS)).into_response()
}

/// GET /subjects/:subject_id
pub async fn get_subject(Path(subject_id): Path<String>) -> impl IntoResponse {
    match subjects::subject(&subject_id) {
        Some(subject) => (StatusCode::OK, Json(subject)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Subject {} not found", subject_id),
            }),
        )
            .into_response(),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
