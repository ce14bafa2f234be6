//! Liveness and readiness handlers

use axum::{extract::State, http::StatusCode};
use sqlx::PgPool;

/// Liveness probe: the process is up
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness probe: the service can reach its database
pub async fn readiness(State(pool): State<PgPool>) -> Result<&'static str, StatusCode> {
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)?;

    Ok("ready")
}
