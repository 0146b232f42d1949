//! Snapshot reads shared by the dashboard and the report export. Each
//! request fetches its slice here once; aggregation never queries again.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use contracts::domain::catalog::{Product, Seller};
use contracts::domain::customers::CustomerProvince;
use contracts::domain::orders::{Order, OrderItem};
use contracts::enums::OrderStatus;
use sea_orm::{FromQueryResult, Statement};
use std::collections::HashMap;

use super::db::get_connection;

const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, FromQueryResult)]
struct SellerRow {
    id: String,
    user_id: String,
    shop_name: String,
}

#[derive(Debug, FromQueryResult)]
struct OrderRow {
    id: String,
    customer_id: Option<String>,
    customer_name: Option<String>,
    seller_id: String,
    subtotal: f64,
    discount: f64,
    shipping_fee: f64,
    tax: f64,
    final_total: f64,
    status: String,
    payment_method: String,
    created_at: String,
}

#[derive(Debug, FromQueryResult)]
struct OrderItemRow {
    order_id: String,
    product_id: String,
    product_name: Option<String>,
    category_name: Option<String>,
    quantity: i64,
    unit_price: f64,
    line_total: f64,
}

/// Find the storefront owned by a platform user, if any
pub async fn find_seller_by_user(user_id: &str) -> Result<Option<Seller>> {
    let db = get_connection();

    let sql = r#"
        SELECT id, user_id, shop_name
        FROM sellers
        WHERE user_id = ?
        LIMIT 1
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [user_id.into()],
    );
    let row = SellerRow::find_by_statement(stmt).one(db).await?;

    Ok(row.map(|r| Seller {
        id: r.id,
        user_id: r.user_id,
        shop_name: r.shop_name,
    }))
}

/// One seller's orders (with their items) created inside `[from, to]`.
/// The result is the immutable snapshot every aggregate is computed over;
/// no further queries happen during aggregation.
pub async fn orders_in_window(seller_id: &str, from: &str, to: &str) -> Result<Vec<Order>> {
    let db = get_connection();

    let order_sql = r#"
        SELECT
            o.id,
            o.customer_id,
            u.display_name AS customer_name,
            o.seller_id,
            o.subtotal,
            o.discount,
            o.shipping_fee,
            o.tax,
            o.final_total,
            o.status,
            o.payment_method,
            o.created_at
        FROM orders o
        LEFT JOIN customers u ON o.customer_id = u.id
        WHERE o.seller_id = ? AND o.created_at >= ? AND o.created_at <= ?
        ORDER BY o.created_at
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        order_sql,
        [seller_id.into(), from.into(), to.into()],
    );
    let order_rows = OrderRow::find_by_statement(stmt).all(db).await?;

    if order_rows.is_empty() {
        return Ok(Vec::new());
    }

    let item_sql = r#"
        SELECT
            oi.order_id,
            oi.product_id,
            p.name AS product_name,
            p.category_name,
            oi.quantity,
            oi.unit_price,
            oi.line_total
        FROM order_items oi
        JOIN orders o ON oi.order_id = o.id
        LEFT JOIN products p ON oi.product_id = p.id
        WHERE o.seller_id = ? AND o.created_at >= ? AND o.created_at <= ?
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        item_sql,
        [seller_id.into(), from.into(), to.into()],
    );
    let item_rows = OrderItemRow::find_by_statement(stmt).all(db).await?;

    let mut items_by_order: HashMap<String, Vec<OrderItem>> = HashMap::new();
    for row in item_rows {
        items_by_order
            .entry(row.order_id.clone())
            .or_default()
            .push(OrderItem {
                product_name: row
                    .product_name
                    .unwrap_or_else(|| row.product_id.clone()),
                product_id: row.product_id,
                category_name: row.category_name,
                quantity: row.quantity,
                unit_price: row.unit_price,
                line_total: row.line_total,
            });
    }

    let mut orders = Vec::with_capacity(order_rows.len());
    for row in order_rows {
        let created_at = NaiveDateTime::parse_from_str(&row.created_at, DATETIME_FMT)
            .or_else(|_| NaiveDateTime::parse_from_str(&row.created_at, "%Y-%m-%dT%H:%M:%S"))
            .with_context(|| format!("bad created_at on order {}: {}", row.id, row.created_at))?;
        orders.push(Order {
            items: items_by_order.remove(&row.id).unwrap_or_default(),
            id: row.id,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            seller_id: row.seller_id,
            subtotal: row.subtotal,
            discount: row.discount,
            shipping_fee: row.shipping_fee,
            tax: row.tax,
            final_total: row.final_total,
            status: OrderStatus::from_code_or_default(&row.status),
            payment_method: row.payment_method,
            created_at,
        });
    }

    Ok(orders)
}

/// Full product list of one storefront
pub async fn products_for_seller(seller_id: &str) -> Result<Vec<Product>> {
    let db = get_connection();

    let sql = r#"
        SELECT id, seller_id, name, category_name, price, quantity, total_sold
        FROM products
        WHERE seller_id = ?
        ORDER BY name
    "#;

    #[derive(Debug, FromQueryResult)]
    struct ProductRow {
        id: String,
        seller_id: String,
        name: String,
        category_name: Option<String>,
        price: f64,
        quantity: i64,
        total_sold: i64,
    }

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [seller_id.into()],
    );
    let rows = ProductRow::find_by_statement(stmt).all(db).await?;

    Ok(rows
        .into_iter()
        .map(|r| Product {
            id: r.id,
            seller_id: r.seller_id,
            name: r.name,
            category_name: r.category_name,
            price: r.price,
            quantity: r.quantity,
            total_sold: r.total_sold,
        })
        .collect())
}

/// Default-address province for every distinct customer that ordered from
/// the seller inside the window
pub async fn customer_provinces(seller_id: &str, from: &str, to: &str) -> Result<Vec<CustomerProvince>> {
    let db = get_connection();

    let sql = r#"
        SELECT DISTINCT
            o.customer_id AS customer_id,
            a.province
        FROM orders o
        LEFT JOIN customer_addresses a
            ON a.customer_id = o.customer_id AND a.is_default = 1
        WHERE o.seller_id = ?
            AND o.customer_id IS NOT NULL
            AND o.created_at >= ? AND o.created_at <= ?
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [seller_id.into(), from.into(), to.into()],
    );
    let rows = CustomerProvinceRow::find_by_statement(stmt).all(db).await?;

    Ok(rows
        .into_iter()
        .map(|r| CustomerProvince {
            customer_id: r.customer_id,
            province: r.province,
        })
        .collect())
}

#[derive(Debug, FromQueryResult)]
struct CustomerProvinceRow {
    customer_id: String,
    province: Option<String>,
}
