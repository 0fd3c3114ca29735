use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod health;
pub mod insights;
pub mod wellbeing;
pub mod ws;

pub fn router(state: AppState) -> Router {
    let allowed_origins: Vec<HeaderValue> = match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => vec![origin],
        Err(_) => {
            tracing::warn!(frontend_url = %state.config.frontend_url, "Invalid FRONTEND_URL, CORS disabled");
            Vec::new()
        }
    };
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/readyz", get(health::readyz))
        .route("/api/insights", get(insights::get_insights))
        .route("/api/insights/refresh", post(insights::refresh_insights))
        .route("/api/wellbeing", get(wellbeing::get_wellbeing))
        .route("/ws", get(ws::ws_handler))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
