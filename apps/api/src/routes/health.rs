use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use tracing::warn;

use crate::state::AppState;

/// GET /health
/// 200 when Postgres answers, 503 otherwise. Redis is reported but not required.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "ok",
        Err(e) => {
            warn!("Health check: database unreachable: {e}");
            "unavailable"
        }
    };
    let redis = redis_status(&state.redis).await;

    let status = if database == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if status == StatusCode::OK { "ok" } else { "degraded" },
            "version": env!("CARGO_PKG_VERSION"),
            "service": "cv-copilot-api",
            "database": database,
            "redis": redis,
        })),
    )
}

async fn redis_status(client: &redis::Client) -> &'static str {
    let mut conn = match client.get_multiplexed_async_connection().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!("Health check: redis unreachable: {e}");
            return "unavailable";
        }
    };
    match redis::cmd("PING").query_async::<_, String>(&mut conn).await {
        Ok(_) => "ok",
        Err(e) => {
            warn!("Health check: redis ping failed: {e}");
            "unavailable"
        }
    }
}
