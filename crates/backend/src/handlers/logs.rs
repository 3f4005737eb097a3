use axum::extract::Query;
use axum::http::StatusCode;
use axum::Json;
use contracts::shared::logger::{CreateLogRequest, LogEntry};
use serde::Deserialize;

use crate::shared::logger;

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub category: Option<String>,
}

/// GET /api/logs
pub async fn list_all(Query(query): Query<LogQuery>) -> Result<Json<Vec<LogEntry>>, StatusCode> {
    logger::repository::list_logs(query.category.as_deref())
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!("Failed to read system log: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// POST /api/logs
pub async fn create(Json(req): Json<CreateLogRequest>) -> StatusCode {
    if req.category.trim().is_empty() || req.message.trim().is_empty() {
        return StatusCode::BAD_REQUEST;
    }
    match logger::repository::log_event(&req.source, &req.category, &req.message).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to write system log: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// DELETE /api/logs
pub async fn clear_all() -> StatusCode {
    match logger::repository::clear_all_logs().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
