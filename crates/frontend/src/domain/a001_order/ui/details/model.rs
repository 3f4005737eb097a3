//! API layer for order details

use crate::shared::api_utils::api_url;
use contracts::domain::a001_order::aggregate::{ChangeStatusRequest, Order};
use gloo_net::http::Request;

pub async fn fetch_by_id(id: &str) -> Result<Order, String> {
    let url = api_url(&format!("/api/a001/order/{}", id));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Failed to fetch: {}", e))?;

    if response.status() == 404 {
        return Err("Order not found".to_string());
    }
    if !response.ok() {
        return Err(format!("Server error: {}", response.status()));
    }

    response
        .json::<Order>()
        .await
        .map_err(|e| format!("Failed to parse order: {}", e))
}

pub async fn change_status(id: &str, status: &str) -> Result<Order, String> {
    let url = api_url(&format!("/api/a001/order/{}/status", id));
    let body = ChangeStatusRequest {
        status: status.to_string(),
    };
    let response = Request::post(&url)
        .json(&body)
        .map_err(|e| format!("Failed to encode request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send: {}", e))?;

    match response.status() {
        200 => response
            .json::<Order>()
            .await
            .map_err(|e| format!("Failed to parse order: {}", e)),
        409 => Err(format!("Status change to '{}' is not allowed", status)),
        code => Err(format!("Server error: {}", code)),
    }
}
