use axum::{extract::State, Json};
use serde::Serialize;

use crate::models::InsightsReport;
use crate::AppState;

/// `pending` until the first refresh has completed; a week without entries
/// is still `ready`, just with an empty report.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InsightsResponse {
    Pending,
    Ready(InsightsReport),
}

impl From<Option<InsightsReport>> for InsightsResponse {
    fn from(report: Option<InsightsReport>) -> Self {
        match report {
            Some(report) => Self::Ready(report),
            None => Self::Pending,
        }
    }
}

pub async fn get_insights(State(state): State<AppState>) -> Json<InsightsResponse> {
    Json(state.refresher.snapshots().insights().await.into())
}

/// Recomputes on demand, e.g. when the dashboard is opened.
pub async fn refresh_insights(State(state): State<AppState>) -> Json<InsightsResponse> {
    let report = state.refresher.refresh_insights_once().await;
    Json(InsightsResponse::Ready(report))
}
