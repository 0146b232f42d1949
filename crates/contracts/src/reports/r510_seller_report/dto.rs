use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Export request for the downloadable seller report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    pub user_id: String,
    pub period: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Empty means every section
    #[serde(default)]
    pub sections: Vec<ReportSection>,
    #[serde(default)]
    pub format: ReportFormat,
}

/// Report sections, one sheet each (skipped when empty)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSection {
    Orders,
    Products,
    TopCustomers,
    DailyRevenue,
    StatusBreakdown,
}

impl ReportSection {
    pub fn all() -> Vec<ReportSection> {
        vec![
            ReportSection::Orders,
            ReportSection::Products,
            ReportSection::TopCustomers,
            ReportSection::DailyRevenue,
            ReportSection::StatusBreakdown,
        ]
    }

    /// Stable code persisted in the audit log
    pub fn code(&self) -> &'static str {
        match self {
            ReportSection::Orders => "orders",
            ReportSection::Products => "products",
            ReportSection::TopCustomers => "top_customers",
            ReportSection::DailyRevenue => "daily_revenue",
            ReportSection::StatusBreakdown => "status_breakdown",
        }
    }

    /// Sheet title in the exported workbook
    pub fn sheet_title(&self) -> &'static str {
        match self {
            ReportSection::Orders => "Đơn hàng",
            ReportSection::Products => "Sản phẩm",
            ReportSection::TopCustomers => "Khách hàng",
            ReportSection::DailyRevenue => "Doanh thu theo ngày",
            ReportSection::StatusBreakdown => "Trạng thái đơn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ReportFormat::Csv => "text/csv",
        }
    }

    pub fn code(&self) -> &'static str {
        self.extension()
    }
}

/// Top customer row for the export (top 5 by total spend)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCustomerEntry {
    pub customer_id: String,
    pub name: String,
    pub orders: u64,
    pub total_spent: f64,
}

/// Order count and revenue per lifecycle status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub orders: u64,
    pub revenue: f64,
}
