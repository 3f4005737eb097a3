use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_order::aggregate::{ChangeStatusRequest, Order, OrderDto};
use contracts::domain::a001_order::error::OrderError;
use contracts::domain::a001_order::timeline::TimelineStep;
use contracts::enums::order_status::{OrderStatus, OrderStatusInfo};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::a001_order;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

/// Код ответа для ошибки сервиса заказов
pub fn error_status(e: &anyhow::Error) -> StatusCode {
    match e.downcast_ref::<OrderError>() {
        Some(OrderError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(OrderError::InvalidTransition { .. }) => StatusCode::CONFLICT,
        Some(OrderError::UnrecognizedStatus(_)) => StatusCode::CONFLICT,
        Some(OrderError::Conflict(_)) => StatusCode::CONFLICT,
        Some(OrderError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn parse_id(id: &str) -> Result<Uuid, StatusCode> {
    Uuid::parse_str(id).map_err(|_| StatusCode::BAD_REQUEST)
}

fn parse_status(code: &str) -> Result<OrderStatus, StatusCode> {
    OrderStatus::from_code(code).ok_or_else(|| {
        tracing::warn!("Rejected unknown status code '{}'", code);
        StatusCode::BAD_REQUEST
    })
}

/// GET /api/a001/order
pub async fn list_all(Query(query): Query<ListQuery>) -> Result<Json<Vec<Order>>, StatusCode> {
    let status = match query.status.as_deref() {
        Some(code) if !code.is_empty() => Some(parse_status(code)?),
        _ => None,
    };

    let items = a001_order::service::list_all(status).await.map_err(|e| {
        tracing::error!("Failed to list orders: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(items))
}

/// GET /api/a001/order/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Order>, StatusCode> {
    let uuid = parse_id(&id)?;

    let item = a001_order::service::get_by_id(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get order {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(item))
}

/// POST /api/a001/order
pub async fn create(Json(dto): Json<OrderDto>) -> Result<Json<serde_json::Value>, StatusCode> {
    let id = a001_order::service::create(dto).await.map_err(|e| {
        tracing::error!("Failed to create order: {}", e);
        error_status(&e)
    })?;

    Ok(Json(serde_json::json!({ "id": id.to_string() })))
}

/// POST /api/a001/order/:id/status
pub async fn change_status(
    Path(id): Path<String>,
    Json(req): Json<ChangeStatusRequest>,
) -> Result<Json<Order>, StatusCode> {
    let uuid = parse_id(&id)?;
    let next = parse_status(&req.status)?;

    let order = a001_order::service::change_status(uuid, next)
        .await
        .map_err(|e| {
            tracing::error!("Failed to change status of order {}: {}", id, e);
            error_status(&e)
        })?;

    Ok(Json(order))
}

/// GET /api/a001/order/:id/timeline
pub async fn timeline(Path(id): Path<String>) -> Result<Json<Vec<TimelineStep>>, StatusCode> {
    let uuid = parse_id(&id)?;

    let steps = a001_order::service::timeline(uuid)
        .await
        .map_err(|e| {
            tracing::error!("Failed to build timeline for order {}: {}", id, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(steps))
}

/// GET /api/order-statuses
pub async fn list_statuses() -> Json<Vec<OrderStatusInfo>> {
    Json(OrderStatus::all().into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let not_found = anyhow::Error::from(OrderError::NotFound("x".into()));
        assert_eq!(error_status(&not_found), StatusCode::NOT_FOUND);

        let conflict = anyhow::Error::from(OrderError::InvalidTransition {
            from: OrderStatus::Placed,
            to: OrderStatus::Delivered,
        });
        assert_eq!(error_status(&conflict), StatusCode::CONFLICT);

        let stale = anyhow::Error::from(OrderError::Conflict("ORD-1".into()));
        assert_eq!(error_status(&stale), StatusCode::CONFLICT);

        let invalid = anyhow::Error::from(OrderError::Validation("empty".into()));
        assert_eq!(error_status(&invalid), StatusCode::UNPROCESSABLE_ENTITY);

        let other = anyhow::anyhow!("db is down");
        assert_eq!(error_status(&other), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("return pending"), Ok(OrderStatus::ReturnPending));
        assert_eq!(parse_status("archived"), Err(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn test_parse_id() {
        assert!(parse_id("not-a-uuid").is_err());
        assert!(parse_id(&Uuid::new_v4().to_string()).is_ok());
    }

    #[tokio::test]
    async fn test_list_statuses() {
        let Json(statuses) = list_statuses().await;
        assert_eq!(statuses.len(), 12);
        assert_eq!(statuses[0].code, "placed");
    }
}
