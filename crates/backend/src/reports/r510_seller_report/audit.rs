use anyhow::Result;
use contracts::domain::audit::ReportAudit;
use sea_orm::{ConnectionTrait, Statement};

use crate::shared::data::db::get_connection;

/// Append one audit row. Rows are never updated or deleted; there is no
/// read path in this service.
pub async fn insert(entry: &ReportAudit) -> Result<()> {
    let db = get_connection();

    let sql = r#"
        INSERT INTO report_audit
            (user_id, seller_id, sections, format, period_label,
             period_start, period_end, success, error_message,
             duration_ms, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [
            entry.user_id.clone().into(),
            entry.seller_id.clone().into(),
            entry.sections.clone().into(),
            entry.format.clone().into(),
            entry.period_label.clone().into(),
            entry.period_start.clone().into(),
            entry.period_end.clone().into(),
            entry.success.into(),
            entry.error_message.clone().into(),
            entry.duration_ms.into(),
            entry.created_at.clone().into(),
        ],
    );
    db.execute(stmt).await?;

    Ok(())
}
