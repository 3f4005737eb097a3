use serde::{Deserialize, Serialize};

/// Категория записей об аномалиях статуса заказа
pub const CATEGORY_ORDER_STATUS: &str = "order_status";

/// Запись системного лога
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: String,
    pub source: String, // "client" или "server"
    pub category: String,
    pub message: String,
}

/// DTO для добавления записи в лог
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLogRequest {
    pub source: String,
    pub category: String,
    pub message: String,
}

impl CreateLogRequest {
    /// Запись, отправляемая из браузера
    pub fn client(category: &str, message: impl Into<String>) -> Self {
        Self {
            source: "client".to_string(),
            category: category.to_string(),
            message: message.into(),
        }
    }
}
