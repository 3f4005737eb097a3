use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 ORDERS
        // ========================================
        .route(
            "/api/a001/order",
            get(handlers::a001_order::list_all).post(handlers::a001_order::create),
        )
        .route("/api/a001/order/:id", get(handlers::a001_order::get_by_id))
        .route(
            "/api/a001/order/:id/status",
            post(handlers::a001_order::change_status),
        )
        .route(
            "/api/a001/order/:id/timeline",
            get(handlers::a001_order::timeline),
        )
        .route(
            "/api/order-statuses",
            get(handlers::a001_order::list_statuses),
        )
        // ========================================
        // SYSTEM LOG
        // ========================================
        .route(
            "/api/logs",
            get(handlers::logs::list_all)
                .post(handlers::logs::create)
                .delete(handlers::logs::clear_all),
        )
}
