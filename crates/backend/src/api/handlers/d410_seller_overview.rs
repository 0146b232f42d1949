use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d410_seller_overview::{SellerOverviewRequest, SellerOverviewResponse};

use crate::dashboards::d410_seller_overview::service;

/// GET /api/d410/seller-overview?user_id=...&period=30days
pub async fn get_seller_overview(
    Query(request): Query<SellerOverviewRequest>,
) -> Result<Json<SellerOverviewResponse>, StatusCode> {
    tracing::info!(
        "D410 Dashboard: overview for user {} period {:?}",
        request.user_id,
        request.period
    );

    match service::get_seller_overview(request).await {
        Ok(Some(response)) => {
            tracing::info!(
                "D410 Dashboard: returning {} series points, {} top products",
                response.revenue_series.len(),
                response.top_products.len()
            );
            Ok(Json(response))
        }
        Ok(None) => {
            tracing::warn!("D410 Dashboard: user has no seller profile");
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            tracing::error!("D410 Dashboard: failed to build overview: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
