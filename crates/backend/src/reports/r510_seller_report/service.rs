use anyhow::Result;
use chrono::Utc;
use contracts::domain::audit::ReportAudit;
use contracts::domain::catalog::Seller;
use contracts::domain::orders::Order;
use contracts::enums::OrderStatus;
use contracts::reports::r510_seller_report::{
    ReportFormat, ReportRequest, ReportSection, StatusCount,
};
use contracts::shared::period::ResolvedPeriod;
use std::time::Instant;
use thiserror::Error;

use super::{audit, workbook};
use crate::analytics::{customers, sales};
use crate::shared::config;
use crate::shared::data::read_model;
use crate::shared::format::{format_number, format_vnd};

/// Finished export, ready to stream to the client
pub struct ReportExport {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("report generation failed: {0}")]
    Generation(#[source] anyhow::Error),
}

/// Generate the downloadable seller report.
///
/// Returns None when the user owns no storefront (nothing is aggregated
/// and no audit row is written). Otherwise exactly one audit row is
/// recorded, whether generation succeeds or fails; a failed generation
/// never returns partial bytes.
pub async fn export_seller_report(request: ReportRequest) -> Result<Option<ReportExport>> {
    let seller = match read_model::find_seller_by_user(&request.user_id).await? {
        Some(seller) => seller,
        None => return Ok(None),
    };

    let period = ResolvedPeriod::resolve(
        request.period.as_deref(),
        request.start_date,
        request.end_date,
    );
    let sections = if request.sections.is_empty() {
        ReportSection::all()
    } else {
        request.sections.clone()
    };

    let started = Instant::now();
    let result = generate(&seller, &period, &sections, request.format).await;

    let audit_row = ReportAudit {
        user_id: request.user_id.clone(),
        seller_id: seller.id.clone(),
        sections: sections
            .iter()
            .map(|s| s.code())
            .collect::<Vec<_>>()
            .join(","),
        format: request.format.code().to_string(),
        period_label: period.label.clone(),
        period_start: period.start.format("%Y-%m-%d").to_string(),
        period_end: period.end.format("%Y-%m-%d").to_string(),
        success: result.is_ok(),
        error_message: result.as_ref().err().map(|e| e.to_string()),
        duration_ms: started.elapsed().as_millis() as i64,
        created_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    // The export outcome stands even if the audit insert fails; that
    // failure is only logged.
    if let Err(e) = audit::insert(&audit_row).await {
        tracing::error!("R510 report: failed to write audit record: {}", e);
    }

    match result {
        Ok(export) => Ok(Some(export)),
        Err(e) => Err(ExportError::Generation(e).into()),
    }
}

async fn generate(
    seller: &Seller,
    period: &ResolvedPeriod,
    sections: &[ReportSection],
    format: ReportFormat,
) -> Result<ReportExport> {
    let analytics = &config::get().analytics;

    let orders =
        read_model::orders_in_window(&seller.id, &period.start_bound(), &period.end_bound())
            .await?;
    let previous_orders = read_model::orders_in_window(
        &seller.id,
        &period.previous_start_bound(),
        &period.previous_end_bound(),
    )
    .await?;
    let products = read_model::products_for_seller(&seller.id).await?;

    let data = workbook::ReportData {
        shop_name: seller.shop_name.clone(),
        period: period.clone(),
        summary: build_summary(&orders, &previous_orders),
        sections: sections.to_vec(),
        top_customers: customers::top_customers(&orders, analytics.top_limit),
        daily_revenue: sales::revenue_series(
            &orders,
            period.start,
            period.end,
            analytics.profit_margin,
        ),
        status_breakdown: status_breakdown(&orders),
        orders,
        products,
    };

    let bytes = match format {
        ReportFormat::Xlsx => workbook::build_xlsx(&data)?,
        ReportFormat::Csv => workbook::build_csv(&data)?,
    };

    Ok(ReportExport {
        filename: format!(
            "bao-cao-{}-{}.{}",
            period.label,
            period.end.format("%Y-%m-%d"),
            format.extension()
        ),
        content_type: format.content_type(),
        bytes,
    })
}

/// Summary block of the report. Unlike the dashboard, the headline
/// revenue counts delivered orders only; both figures are kept distinct
/// on purpose rather than unified.
fn build_summary(orders: &[Order], previous_orders: &[Order]) -> Vec<(String, String)> {
    let revenue = sales::delivered_revenue(orders);
    let delivered = sales::delivered_count(orders);
    let order_count = orders.len() as u64;
    let unique = sales::unique_customers(orders);
    let aov = sales::average_order_value(revenue, delivered);
    let conversion = sales::conversion_rate(order_count, unique);

    let prev_revenue = sales::delivered_revenue(previous_orders);
    let growth = crate::analytics::change::percent_change(revenue, prev_revenue);

    vec![
        (
            "Tổng doanh thu (đã giao)".to_string(),
            format_vnd(revenue),
        ),
        ("Số đơn hàng".to_string(), format_number(order_count as i64)),
        ("Đơn đã giao".to_string(), format_number(delivered as i64)),
        ("Khách hàng".to_string(), format_number(unique as i64)),
        ("Giá trị đơn trung bình".to_string(), format_vnd(aov)),
        (
            "Tỷ lệ chuyển đổi".to_string(),
            format!("{:.1}%", conversion),
        ),
        (
            "Doanh thu kỳ trước (đã giao)".to_string(),
            format_vnd(prev_revenue),
        ),
        (
            "Tăng trưởng doanh thu".to_string(),
            format!("{:+.1}%", growth),
        ),
    ]
}

/// Order count and revenue per lifecycle status, statuses with no orders
/// omitted
fn status_breakdown(orders: &[Order]) -> Vec<StatusCount> {
    OrderStatus::all()
        .into_iter()
        .filter_map(|status| {
            let matching: Vec<&Order> = orders.iter().filter(|o| o.status == status).collect();
            if matching.is_empty() {
                return None;
            }
            Some(StatusCount {
                status: status.display_name().to_string(),
                orders: matching.len() as u64,
                revenue: matching.iter().map(|o| o.final_total).sum(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn order(id: &str, total: f64, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            customer_id: Some("c1".to_string()),
            customer_name: Some("Trần Văn A".to_string()),
            seller_id: "s1".to_string(),
            subtotal: total,
            discount: 0.0,
            shipping_fee: 0.0,
            tax: 0.0,
            final_total: total,
            status,
            payment_method: "cod".to_string(),
            created_at: NaiveDateTime::parse_from_str("2025-06-01 08:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            items: vec![],
        }
    }

    #[test]
    fn summary_revenue_counts_delivered_only() {
        let orders = vec![
            order("o1", 100.0, OrderStatus::Delivered),
            order("o2", 200.0, OrderStatus::Pending),
            order("o3", 300.0, OrderStatus::Delivered),
        ];
        let summary = build_summary(&orders, &[]);
        assert_eq!(summary[0].0, "Tổng doanh thu (đã giao)");
        assert_eq!(summary[0].1, "400 ₫");
        assert_eq!(summary[1].1, "3");
        assert_eq!(summary[2].1, "2");
        // growth from an empty previous window is capped at +100%
        assert_eq!(summary[7].1, "+100.0%");
    }

    #[test]
    fn summary_handles_empty_window() {
        let summary = build_summary(&[], &[]);
        assert_eq!(summary[0].1, "0 ₫");
        assert_eq!(summary[4].1, "0 ₫");
        assert_eq!(summary[5].1, "0.0%");
        assert_eq!(summary[7].1, "+0.0%");
    }

    #[test]
    fn status_breakdown_skips_absent_statuses() {
        let orders = vec![
            order("o1", 100.0, OrderStatus::Delivered),
            order("o2", 200.0, OrderStatus::Delivered),
            order("o3", 50.0, OrderStatus::Cancelled),
        ];
        let breakdown = status_breakdown(&orders);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(breakdown[0].status, OrderStatus::Delivered.display_name());
        assert_eq!(breakdown[0].orders, 2);
        assert_eq!(breakdown[0].revenue, 300.0);
        assert_eq!(breakdown[1].status, OrderStatus::Cancelled.display_name());
    }
}
