//! Order queries and the transactional line-item sub-flow.
//!
//! Every line-item insert and its matching order-total update happen in
//! one transaction so `orders.total_amount` always equals the signed sum
//! of line-item subtotals.

use rust_decimal::Decimal;
use shared::models::{
    Drink, LineAction, Order, OrderDetail, OrderDrinkLine, OrderPlateLine, OrderPlateProductLine,
    OrderSummary, OrderUpdate, Plate, Product,
};
use shared::util::{line_subtotal, now_millis};
use sqlx::PgPool;

const ORDER_COLUMNS: &str = "id, restaurant_id, table_id, account_id, status, total_amount, notes, order_date, created_at, updated_at";

pub async fn create_order(
    pool: &PgPool,
    restaurant_id: i64,
    table_id: Option<i64>,
    account_id: i64,
    status: &str,
    notes: Option<&str>,
) -> Result<Order, sqlx::Error> {
    let now = now_millis();
    sqlx::query_as(&format!(
        r#"
        INSERT INTO orders (restaurant_id, table_id, account_id, status, total_amount, notes, order_date, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 0, $5, $6, $6, $6)
        RETURNING {ORDER_COLUMNS}
        "#,
    ))
    .bind(restaurant_id)
    .bind(table_id)
    .bind(account_id)
    .bind(status)
    .bind(notes)
    .bind(now)
    .fetch_one(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn list_orders(
    pool: &PgPool,
    tenant_id: i64,
    restaurant_id: Option<i64>,
    table_id: Option<i64>,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<OrderSummary>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT o.id, o.restaurant_id, r.name AS restaurant_name, o.table_id,
               t.number AS table_number, o.status, o.total_amount, o.notes,
               o.order_date, o.created_at
        FROM orders o
        JOIN restaurants r ON r.id = o.restaurant_id
        LEFT JOIN tables t ON t.id = o.table_id
        WHERE r.tenant_id = $1
          AND ($2::BIGINT IS NULL OR o.restaurant_id = $2)
          AND ($3::BIGINT IS NULL OR o.table_id = $3)
          AND ($4::TEXT IS NULL OR o.status = $4)
        ORDER BY o.order_date DESC, o.id DESC
        LIMIT $5 OFFSET $6
        "#,
    )
    .bind(tenant_id)
    .bind(restaurant_id)
    .bind(table_id)
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_orders(
    pool: &PgPool,
    tenant_id: i64,
    restaurant_id: Option<i64>,
    table_id: Option<i64>,
    status: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM orders o
        JOIN restaurants r ON r.id = o.restaurant_id
        WHERE r.tenant_id = $1
          AND ($2::BIGINT IS NULL OR o.restaurant_id = $2)
          AND ($3::BIGINT IS NULL OR o.table_id = $3)
          AND ($4::TEXT IS NULL OR o.status = $4)
        "#,
    )
    .bind(tenant_id)
    .bind(restaurant_id)
    .bind(table_id)
    .bind(status)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn get_order(
    pool: &PgPool,
    order_id: i64,
    tenant_id: i64,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT o.id, o.restaurant_id, o.table_id, o.account_id, o.status, o.total_amount,
               o.notes, o.order_date, o.created_at, o.updated_at
        FROM orders o
        JOIN restaurants r ON r.id = o.restaurant_id
        WHERE o.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(order_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

#[derive(sqlx::FromRow)]
struct ProductLineRow {
    order_plate_id: i64,
    id: i64,
    product_id: i64,
    product_name: String,
    quantity: i32,
    unit_price: Decimal,
    subtotal: Decimal,
    action: String,
    notes: Option<String>,
}

/// Assemble the full detail view: plate lines with their customizations,
/// plus drink lines.
pub async fn order_detail(pool: &PgPool, order: Order) -> Result<OrderDetail, sqlx::Error> {
    let mut plates: Vec<OrderPlateLine> = sqlx::query_as(
        r#"
        SELECT op.id, op.plate_id, p.name AS plate_name, op.quantity, op.unit_price,
               op.subtotal, op.notes
        FROM order_plates op
        JOIN plates p ON p.id = op.plate_id
        WHERE op.order_id = $1
        ORDER BY op.id
        "#,
    )
    .bind(order.id)
    .fetch_all(pool)
    .await?;

    let product_rows: Vec<ProductLineRow> = sqlx::query_as(
        r#"
        SELECT opp.order_plate_id, opp.id, opp.product_id, pr.name AS product_name,
               opp.quantity, opp.unit_price, opp.subtotal, opp.action, opp.notes
        FROM order_plate_products opp
        JOIN order_plates op ON op.id = opp.order_plate_id
        JOIN products pr ON pr.id = opp.product_id
        WHERE op.order_id = $1
        ORDER BY opp.id
        "#,
    )
    .bind(order.id)
    .fetch_all(pool)
    .await?;

    for row in product_rows {
        if let Some(line) = plates.iter_mut().find(|l| l.id == row.order_plate_id) {
            line.products.push(OrderPlateProductLine {
                id: row.id,
                product_id: row.product_id,
                product_name: row.product_name,
                quantity: row.quantity,
                unit_price: row.unit_price,
                subtotal: row.subtotal,
                action: row.action,
                notes: row.notes,
            });
        }
    }

    let drinks: Vec<OrderDrinkLine> = sqlx::query_as(
        r#"
        SELECT od.id, od.drink_id, d.name AS drink_name, od.quantity, od.unit_price,
               od.subtotal, od.notes
        FROM order_drinks od
        JOIN drinks d ON d.id = od.drink_id
        WHERE od.order_id = $1
        ORDER BY od.id
        "#,
    )
    .bind(order.id)
    .fetch_all(pool)
    .await?;

    Ok(OrderDetail {
        order,
        plates,
        drinks,
    })
}

pub async fn update_order(
    pool: &PgPool,
    order_id: i64,
    data: &OrderUpdate,
) -> Result<Option<Order>, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        UPDATE orders SET
            table_id = COALESCE($1, table_id),
            status = COALESCE($2, status),
            notes = COALESCE($3, notes),
            order_date = COALESCE($4, order_date),
            updated_at = $5
        WHERE id = $6
        RETURNING {ORDER_COLUMNS}
        "#,
    ))
    .bind(data.table_id)
    .bind(&data.status)
    .bind(&data.notes)
    .bind(data.order_date)
    .bind(now_millis())
    .bind(order_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_order(
    pool: &PgPool,
    order_id: i64,
    tenant_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM orders o
        USING restaurants r
        WHERE o.restaurant_id = r.id AND o.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(order_id)
    .bind(tenant_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

/// Insert a plate line and add its subtotal to the order total.
pub async fn add_plate_line(
    pool: &PgPool,
    order_id: i64,
    plate: &Plate,
    quantity: i32,
    notes: Option<&str>,
) -> Result<OrderPlateLine, sqlx::Error> {
    let now = now_millis();
    let subtotal = line_subtotal(plate.price, quantity);
    let mut tx = pool.begin().await?;

    let (line_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO order_plates (order_id, plate_id, quantity, unit_price, subtotal, notes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(order_id)
    .bind(plate.id)
    .bind(quantity)
    .bind(plate.price)
    .bind(subtotal)
    .bind(notes)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE orders SET total_amount = total_amount + $1, updated_at = $2 WHERE id = $3")
        .bind(subtotal)
        .bind(now)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(OrderPlateLine {
        id: line_id,
        plate_id: plate.id,
        plate_name: plate.name.clone(),
        quantity,
        unit_price: plate.price,
        subtotal,
        notes: notes.map(str::to_string),
        products: Vec::new(),
    })
}

/// Insert a drink line and add its subtotal to the order total.
pub async fn add_drink_line(
    pool: &PgPool,
    order_id: i64,
    drink: &Drink,
    quantity: i32,
    notes: Option<&str>,
) -> Result<OrderDrinkLine, sqlx::Error> {
    let now = now_millis();
    let subtotal = line_subtotal(drink.price, quantity);
    let mut tx = pool.begin().await?;

    let (line_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO order_drinks (order_id, drink_id, quantity, unit_price, subtotal, notes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(order_id)
    .bind(drink.id)
    .bind(quantity)
    .bind(drink.price)
    .bind(subtotal)
    .bind(notes)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE orders SET total_amount = total_amount + $1, updated_at = $2 WHERE id = $3")
        .bind(subtotal)
        .bind(now)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(OrderDrinkLine {
        id: line_id,
        drink_id: drink.id,
        drink_name: drink.name.clone(),
        quantity,
        unit_price: drink.price,
        subtotal,
        notes: notes.map(str::to_string),
    })
}

/// Ownership chain for a plate line: its order and the order's status,
/// scoped to the tenant.
#[derive(sqlx::FromRow)]
pub struct PlateLineContext {
    pub order_id: i64,
    pub restaurant_id: i64,
    pub status: String,
}

pub async fn plate_line_context(
    pool: &PgPool,
    order_plate_id: i64,
    tenant_id: i64,
) -> Result<Option<PlateLineContext>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT o.id AS order_id, o.restaurant_id, o.status
        FROM order_plates op
        JOIN orders o ON o.id = op.order_id
        JOIN restaurants r ON r.id = o.restaurant_id
        WHERE op.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(order_plate_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

/// Insert a product customization on a plate line and apply its signed
/// subtotal to the order total. Returns `None` without committing when
/// the update would drive the total below zero.
pub async fn add_product_line(
    pool: &PgPool,
    order_id: i64,
    order_plate_id: i64,
    product: &Product,
    quantity: i32,
    action: LineAction,
    notes: Option<&str>,
) -> Result<Option<OrderPlateProductLine>, sqlx::Error> {
    let now = now_millis();
    let subtotal = line_subtotal(product.price, quantity);
    let signed = action.sign() * subtotal;
    let mut tx = pool.begin().await?;

    let (line_id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO order_plate_products (order_plate_id, product_id, quantity, unit_price, subtotal, action, notes, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(order_plate_id)
    .bind(product.id)
    .bind(quantity)
    .bind(product.price)
    .bind(subtotal)
    .bind(action.as_str())
    .bind(notes)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let result = sqlx::query(
        r#"
        UPDATE orders SET total_amount = total_amount + $1, updated_at = $2
        WHERE id = $3 AND total_amount + $1 >= 0
        "#,
    )
    .bind(signed)
    .bind(now)
    .bind(order_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        // Total would go negative. Dropping tx rolls everything back.
        return Ok(None);
    }

    tx.commit().await?;

    Ok(Some(OrderPlateProductLine {
        id: line_id,
        product_id: product.id,
        product_name: product.name.clone(),
        quantity,
        unit_price: product.price,
        subtotal,
        action: action.as_str().to_string(),
        notes: notes.map(str::to_string),
    }))
}
