use axum::{extract::State, Json};
use serde::Serialize;

use crate::models::WellbeingReading;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WellbeingResponse {
    Pending,
    Ready(WellbeingReading),
}

pub async fn get_wellbeing(State(state): State<AppState>) -> Json<WellbeingResponse> {
    let response = match state.refresher.snapshots().wellbeing().await {
        Some(reading) => WellbeingResponse::Ready(reading),
        None => WellbeingResponse::Pending,
    };
    Json(response)
}
