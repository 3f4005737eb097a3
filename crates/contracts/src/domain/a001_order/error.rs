use crate::enums::order_status::OrderStatus;
use thiserror::Error;

/// Ошибки операций над заказом
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Unrecognized order status: {0}")]
    UnrecognizedStatus(String),

    #[error("Status change {from} -> {to} is not allowed")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Заказ изменён другим запросом после чтения
    #[error("Order {0} was modified concurrently")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
