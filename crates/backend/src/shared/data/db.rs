use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Read-model tables consumed by the analytics core plus the append-only
/// report audit log. Everything except report_audit is owned and written by
/// the order/catalog subsystems; this service only reads them.
const TABLES: &[(&str, &str)] = &[
    (
        "sellers",
        r#"
        CREATE TABLE sellers (
            id TEXT PRIMARY KEY NOT NULL,
            user_id TEXT NOT NULL,
            shop_name TEXT NOT NULL,
            created_at TEXT
        );
    "#,
    ),
    (
        "customers",
        r#"
        CREATE TABLE customers (
            id TEXT PRIMARY KEY NOT NULL,
            display_name TEXT NOT NULL DEFAULT '',
            created_at TEXT
        );
    "#,
    ),
    (
        "customer_addresses",
        r#"
        CREATE TABLE customer_addresses (
            id TEXT PRIMARY KEY NOT NULL,
            customer_id TEXT NOT NULL,
            province TEXT,
            district TEXT,
            ward TEXT,
            is_default INTEGER NOT NULL DEFAULT 0
        );
    "#,
    ),
    (
        "products",
        r#"
        CREATE TABLE products (
            id TEXT PRIMARY KEY NOT NULL,
            seller_id TEXT NOT NULL,
            name TEXT NOT NULL,
            category_name TEXT,
            price REAL NOT NULL DEFAULT 0,
            quantity INTEGER NOT NULL DEFAULT 0,
            total_sold INTEGER NOT NULL DEFAULT 0,
            created_at TEXT
        );
    "#,
    ),
    (
        "orders",
        r#"
        CREATE TABLE orders (
            id TEXT PRIMARY KEY NOT NULL,
            customer_id TEXT,
            seller_id TEXT NOT NULL,
            subtotal REAL NOT NULL DEFAULT 0,
            discount REAL NOT NULL DEFAULT 0,
            shipping_fee REAL NOT NULL DEFAULT 0,
            tax REAL NOT NULL DEFAULT 0,
            final_total REAL NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'PENDING',
            payment_method TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        );
    "#,
    ),
    (
        "order_items",
        r#"
        CREATE TABLE order_items (
            id TEXT PRIMARY KEY NOT NULL,
            order_id TEXT NOT NULL,
            product_id TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            unit_price REAL NOT NULL DEFAULT 0,
            line_total REAL NOT NULL DEFAULT 0
        );
    "#,
    ),
    (
        "report_audit",
        r#"
        CREATE TABLE report_audit (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            seller_id TEXT NOT NULL,
            sections TEXT NOT NULL DEFAULT '',
            format TEXT NOT NULL DEFAULT '',
            period_label TEXT NOT NULL DEFAULT '',
            period_start TEXT NOT NULL DEFAULT '',
            period_end TEXT NOT NULL DEFAULT '',
            success INTEGER NOT NULL DEFAULT 0,
            error_message TEXT,
            duration_ms INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
    "#,
    ),
];

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/app.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    ensure_schema(&conn).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Create any missing table (minimal schema bootstrap, idempotent)
async fn ensure_schema(conn: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, ddl) in TABLES {
        let check = format!(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
            name
        );
        let existing = conn
            .query_all(Statement::from_string(DatabaseBackend::Sqlite, check))
            .await?;

        if existing.is_empty() {
            tracing::info!("Creating {} table", name);
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                ddl.to_string(),
            ))
            .await?;
        }
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
