//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_service: Option<bool>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        membership_service: None,
    })
}

/// Readiness check
///
/// Reports whether membership verification is wired to a live service;
/// without one, verification answers `unavailable` but the API still serves.
pub async fn readiness_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let jobs = state.discount_codes.read().await.len();
    tracing::debug!(jobs, "readiness check");

    Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        membership_service: Some(state.membership.is_some()),
    })
}
