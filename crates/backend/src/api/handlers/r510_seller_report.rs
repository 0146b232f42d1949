use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::reports::r510_seller_report::ReportRequest;

use crate::reports::r510_seller_report::service;

/// POST /api/r510/seller-report/export
///
/// Streams the finished spreadsheet back with download headers. A missing
/// seller profile is 404; any generation failure is 500 (the audit row is
/// already written by the service at that point).
pub async fn export_report(Json(request): Json<ReportRequest>) -> Response {
    tracing::info!(
        "R510 Report: export for user {} format {:?}",
        request.user_id,
        request.format
    );

    match service::export_seller_report(request).await {
        Ok(Some(export)) => {
            tracing::info!(
                "R510 Report: generated {} ({} bytes)",
                export.filename,
                export.bytes.len()
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, export.content_type.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", export.filename),
                    ),
                ],
                export.bytes,
            )
                .into_response()
        }
        Ok(None) => {
            tracing::warn!("R510 Report: user has no seller profile");
            StatusCode::NOT_FOUND.into_response()
        }
        Err(e) => {
            tracing::error!("R510 Report: export failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
