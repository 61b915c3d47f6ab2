//! Dining table queries

use shared::models::{Table, TableCreate, TableStatus, TableUpdate};
use shared::util::now_millis;
use sqlx::PgPool;

pub async fn create_table(pool: &PgPool, data: &TableCreate) -> Result<Table, sqlx::Error> {
    let status = data
        .status
        .as_deref()
        .unwrap_or(TableStatus::Available.as_str());
    sqlx::query_as(
        r#"
        INSERT INTO tables (restaurant_id, number, capacity, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING id, restaurant_id, number, capacity, status, created_at, updated_at
        "#,
    )
    .bind(data.restaurant_id)
    .bind(data.number)
    .bind(data.capacity)
    .bind(status)
    .bind(now_millis())
    .fetch_one(pool)
    .await
}

pub async fn list_tables(
    pool: &PgPool,
    tenant_id: i64,
    restaurant_id: Option<i64>,
    status: Option<&str>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Table>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT t.id, t.restaurant_id, t.number, t.capacity, t.status, t.created_at, t.updated_at
        FROM tables t
        JOIN restaurants r ON r.id = t.restaurant_id
        WHERE r.tenant_id = $1
          AND ($2::BIGINT IS NULL OR t.restaurant_id = $2)
          AND ($3::TEXT IS NULL OR t.status = $3)
        ORDER BY t.restaurant_id, t.number
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(tenant_id)
    .bind(restaurant_id)
    .bind(status)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_tables(
    pool: &PgPool,
    tenant_id: i64,
    restaurant_id: Option<i64>,
    status: Option<&str>,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM tables t
        JOIN restaurants r ON r.id = t.restaurant_id
        WHERE r.tenant_id = $1
          AND ($2::BIGINT IS NULL OR t.restaurant_id = $2)
          AND ($3::TEXT IS NULL OR t.status = $3)
        "#,
    )
    .bind(tenant_id)
    .bind(restaurant_id)
    .bind(status)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn get_table(
    pool: &PgPool,
    table_id: i64,
    tenant_id: i64,
) -> Result<Option<Table>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT t.id, t.restaurant_id, t.number, t.capacity, t.status, t.created_at, t.updated_at
        FROM tables t
        JOIN restaurants r ON r.id = t.restaurant_id
        WHERE t.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(table_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_table(
    pool: &PgPool,
    table_id: i64,
    tenant_id: i64,
    data: &TableUpdate,
) -> Result<Option<Table>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE tables t SET
            number = COALESCE($1, t.number),
            capacity = COALESCE($2, t.capacity),
            status = COALESCE($3, t.status),
            updated_at = $4
        FROM restaurants r
        WHERE t.restaurant_id = r.id AND t.id = $5 AND r.tenant_id = $6
        RETURNING t.id, t.restaurant_id, t.number, t.capacity, t.status,
                  t.created_at, t.updated_at
        "#,
    )
    .bind(data.number)
    .bind(data.capacity)
    .bind(&data.status)
    .bind(now_millis())
    .bind(table_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_table(
    pool: &PgPool,
    table_id: i64,
    tenant_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM tables t
        USING restaurants r
        WHERE t.restaurant_id = r.id AND t.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(table_id)
    .bind(tenant_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
