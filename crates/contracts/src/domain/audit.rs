use serde::{Deserialize, Serialize};

/// Append-only audit row written once per report export, success or failure.
/// Never updated after insert; there is no read API for it in this service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportAudit {
    pub user_id: String,
    pub seller_id: String,
    /// Comma-joined section codes that were requested
    pub sections: String,
    pub format: String,
    pub period_label: String,
    /// "YYYY-MM-DD"
    pub period_start: String,
    pub period_end: String,
    pub success: bool,
    pub error_message: Option<String>,
    pub duration_ms: i64,
    /// "YYYY-MM-DD HH:MM:SS", UTC
    pub created_at: String,
}
