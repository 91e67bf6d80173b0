use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Capture session lifecycle
        .route("/sessions/start", post(handlers::start_session))
        .route("/sessions/:session_id/stop", post(handlers::stop_session))
        .route("/sessions/:session_id/reset", post(handlers::reset_session))
        .route(
            "/sessions/:session_id/detection/start",
            post(handlers::start_detection),
        )
        .route(
            "/sessions/:session_id/detection/stop",
            post(handlers::stop_detection),
        )
        .route(
            "/sessions/:session_id/status",
            get(handlers::session_status),
        )
        .route(
            "/sessions/:session_id/history",
            get(handlers::session_history),
        )
        // Assistant
        .route("/chat", post(handlers::chat))
        .route("/chat/history", get(handlers::chat_history))
        .route("/chat/clear", post(handlers::chat_clear))
        .route("/tools/summarize", post(handlers::summarize_text))
        // Sign language conversion and playback
        .route("/signs/convert", post(handlers::convert_signs))
        .route("/signs/play", post(handlers::play_signs))
        .route("/signs/stop", post(handlers::stop_signs))
        .route("/signs/playback", get(handlers::playback_state))
        .route("/signs/copy", post(handlers::copy_signs))
        // Speech I/O
        .route("/speech/listen/start", post(handlers::start_listening))
        .route("/speech/listen/stop", post(handlers::stop_listening))
        .route("/speech/transcript", get(handlers::transcript))
        .route("/speech/speak", post(handlers::speak))
        .route("/speech/speak/cancel", post(handlers::cancel_speaking))
        // Subject browser
        .route("/subjects", get(handlers::list_subjects))
        .route("/subjects/:subject_id", get(handlers::get_subject))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        // The browser front-end runs on a different origin in dev
        .layer(CorsLayer::permissive())
        .with_state(state)
}
