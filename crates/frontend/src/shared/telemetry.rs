//! Отправка сообщений об аномалиях данных в системный лог сервера

use crate::shared::api_utils::api_url;
use contracts::domain::a001_order::timeline::StatusAnomalySink;
use contracts::shared::logger::{CreateLogRequest, CATEGORY_ORDER_STATUS};
use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;

/// Пишет в консоль браузера и отправляет запись в `/api/logs`
pub struct ClientAnomalySink;

impl StatusAnomalySink for ClientAnomalySink {
    fn unrecognized_status(&self, order_ref: &str, raw_status: &str) {
        let message = format!(
            "Order {} has unrecognized status '{}', timeline shown as placed only",
            order_ref, raw_status
        );
        log::warn!("{}", message);
        report(CreateLogRequest::client(CATEGORY_ORDER_STATUS, message));
    }
}

/// Отправить запись лога, не дожидаясь ответа
pub fn report(entry: CreateLogRequest) {
    spawn_local(async move {
        let request = match Request::post(&api_url("/api/logs")).json(&entry) {
            Ok(request) => request,
            Err(e) => {
                log::error!("Failed to encode log entry: {}", e);
                return;
            }
        };
        match request.send().await {
            Ok(response) if response.ok() => {}
            Ok(response) => log::error!("Log endpoint returned {}", response.status()),
            Err(e) => log::error!("Failed to send log entry: {}", e),
        }
    });
}
