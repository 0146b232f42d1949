use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// All application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D410 Seller Overview Dashboard
        .route(
            "/api/d410/seller-overview",
            get(handlers::d410_seller_overview::get_seller_overview),
        )
        // R510 Seller Report export
        .route(
            "/api/r510/seller-report/export",
            post(handlers::r510_seller_report::export_report),
        )
}
