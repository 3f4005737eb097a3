use super::anomaly::ServerAnomalySink;
use super::repository;
use anyhow::Result;
use chrono::Utc;
use contracts::domain::a001_order::aggregate::{Order, OrderDto};
use contracts::domain::a001_order::error::OrderError;
use contracts::domain::a001_order::timeline::{build_timeline_reported, TimelineStep};
use contracts::domain::common::AggregateRoot;
use contracts::enums::order_status::OrderStatus;
use uuid::Uuid;

use crate::shared::format::format_amount;
use crate::shared::logger;

pub async fn list_all(status: Option<OrderStatus>) -> Result<Vec<Order>> {
    repository::list_all(status.map(|s| s.code())).await
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Order>> {
    repository::get_by_id(id).await
}

/// Создать заказ в статусе placed
pub async fn create(dto: OrderDto) -> Result<Uuid> {
    let code = dto
        .code
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| format!("ORD-{}", &Uuid::new_v4().simple().to_string()[..8]));

    let mut aggregate = Order::new_for_insert(code, dto.description, dto.header, dto.lines);
    aggregate.base.comment = dto.comment;
    aggregate.validate()?;

    let id = repository::insert(&aggregate).await?;
    tracing::info!("Created order {} ({})", aggregate.base.code, id);
    logger::log(
        &Order::full_name(),
        &format!(
            "Order {} created, total {}",
            aggregate.base.code,
            format_amount(aggregate.total(), &aggregate.header.currency)
        ),
    );
    Ok(id)
}

/// Перевести заказ в новый статус.
///
/// Ошибки предметной области возвращаются как [`OrderError`] внутри `anyhow::Error`.
pub async fn change_status(id: Uuid, next: OrderStatus) -> Result<Order> {
    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| OrderError::NotFound(id.to_string()))?;

    let previous = aggregate.status.clone();
    aggregate.apply_status(next, Utc::now())?;
    repository::update(&aggregate).await?;

    tracing::info!(
        "Order {} status changed: {} -> {}",
        aggregate.base.code,
        previous,
        next
    );
    logger::log(
        &Order::full_name(),
        &format!(
            "Order {} status changed: {} -> {}",
            aggregate.base.code, previous, next
        ),
    );

    aggregate.base.metadata.increment_version();
    Ok(aggregate)
}

/// Лента доставки; `None`, если заказа нет
pub async fn timeline(id: Uuid) -> Result<Option<Vec<TimelineStep>>> {
    let Some(aggregate) = repository::get_by_id(id).await? else {
        return Ok(None);
    };
    Ok(Some(build_timeline_reported(&aggregate, &ServerAnomalySink)))
}
