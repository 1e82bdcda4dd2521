//! Liveness and diagnostics handlers

use crate::services::DiagnosticsReport;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

pub const API_VERSION: &str = "1.0";

#[derive(Debug, Serialize)]
pub struct Banner {
    message: &'static str,
    version: &'static str,
}

pub async fn root() -> Json<Banner> {
    Json(Banner {
        message: "Industrial API running",
        version: API_VERSION,
    })
}

pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    Json(state.diagnostics.report().await)
}
