//! Restaurant queries

use shared::models::{Restaurant, RestaurantCreate, RestaurantUpdate};
use shared::util::now_millis;
use sqlx::PgPool;

const COLUMNS: &str = "id, tenant_id, name, description, address, phone, email, website, created_at, updated_at";

/// Verify that a restaurant belongs to the given tenant. Returns the
/// restaurant id when it does.
pub async fn verify_ownership(
    pool: &PgPool,
    restaurant_id: i64,
    tenant_id: i64,
) -> Result<Option<i64>, sqlx::Error> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT id FROM restaurants WHERE id = $1 AND tenant_id = $2")
            .bind(restaurant_id)
            .bind(tenant_id)
            .fetch_optional(pool)
            .await?;
    Ok(row.map(|(id,)| id))
}

pub async fn create_restaurant(
    pool: &PgPool,
    tenant_id: i64,
    data: &RestaurantCreate,
) -> Result<Restaurant, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        INSERT INTO restaurants (tenant_id, name, description, address, phone, email, website, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING {COLUMNS}
        "#,
    ))
    .bind(tenant_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.website)
    .bind(now_millis())
    .fetch_one(pool)
    .await
}

pub async fn list_restaurants(
    pool: &PgPool,
    tenant_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<Restaurant>, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        SELECT {COLUMNS}
        FROM restaurants
        WHERE tenant_id = $1
        ORDER BY id
        LIMIT $2 OFFSET $3
        "#,
    ))
    .bind(tenant_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_restaurants(pool: &PgPool, tenant_id: i64) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM restaurants WHERE tenant_id = $1")
        .bind(tenant_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn get_restaurant(
    pool: &PgPool,
    restaurant_id: i64,
    tenant_id: i64,
) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM restaurants WHERE id = $1 AND tenant_id = $2",
    ))
    .bind(restaurant_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_restaurant(
    pool: &PgPool,
    restaurant_id: i64,
    tenant_id: i64,
    data: &RestaurantUpdate,
) -> Result<Option<Restaurant>, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        UPDATE restaurants SET
            name = COALESCE($1, name),
            description = COALESCE($2, description),
            address = COALESCE($3, address),
            phone = COALESCE($4, phone),
            email = COALESCE($5, email),
            website = COALESCE($6, website),
            updated_at = $7
        WHERE id = $8 AND tenant_id = $9
        RETURNING {COLUMNS}
        "#,
    ))
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.address)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(&data.website)
    .bind(now_millis())
    .bind(restaurant_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_restaurant(
    pool: &PgPool,
    restaurant_id: i64,
    tenant_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM restaurants WHERE id = $1 AND tenant_id = $2")
        .bind(restaurant_id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
