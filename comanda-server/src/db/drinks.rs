//! Drink queries

use shared::models::{Drink, DrinkCreate, DrinkUpdate};
use shared::util::now_millis;
use sqlx::PgPool;

pub async fn create_drink(pool: &PgPool, data: &DrinkCreate) -> Result<Drink, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO drinks (restaurant_id, name, description, price, category, is_alcoholic, is_available, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING id, restaurant_id, name, description, price, category, is_alcoholic,
                  is_available, created_at, updated_at
        "#,
    )
    .bind(data.restaurant_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.category)
    .bind(data.is_alcoholic.unwrap_or(false))
    .bind(data.is_available.unwrap_or(true))
    .bind(now_millis())
    .fetch_one(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn list_drinks(
    pool: &PgPool,
    tenant_id: i64,
    restaurant_id: Option<i64>,
    category: Option<&str>,
    is_available: Option<bool>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Drink>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT d.id, d.restaurant_id, d.name, d.description, d.price, d.category,
               d.is_alcoholic, d.is_available, d.created_at, d.updated_at
        FROM drinks d
        JOIN restaurants r ON r.id = d.restaurant_id
        WHERE r.tenant_id = $1
          AND ($2::BIGINT IS NULL OR d.restaurant_id = $2)
          AND ($3::TEXT IS NULL OR d.category = $3)
          AND ($4::BOOLEAN IS NULL OR d.is_available = $4)
        ORDER BY d.id
        LIMIT $5 OFFSET $6
        "#,
    )
    .bind(tenant_id)
    .bind(restaurant_id)
    .bind(category)
    .bind(is_available)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_drinks(
    pool: &PgPool,
    tenant_id: i64,
    restaurant_id: Option<i64>,
    category: Option<&str>,
    is_available: Option<bool>,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM drinks d
        JOIN restaurants r ON r.id = d.restaurant_id
        WHERE r.tenant_id = $1
          AND ($2::BIGINT IS NULL OR d.restaurant_id = $2)
          AND ($3::TEXT IS NULL OR d.category = $3)
          AND ($4::BOOLEAN IS NULL OR d.is_available = $4)
        "#,
    )
    .bind(tenant_id)
    .bind(restaurant_id)
    .bind(category)
    .bind(is_available)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn get_drink(
    pool: &PgPool,
    drink_id: i64,
    tenant_id: i64,
) -> Result<Option<Drink>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT d.id, d.restaurant_id, d.name, d.description, d.price, d.category,
               d.is_alcoholic, d.is_available, d.created_at, d.updated_at
        FROM drinks d
        JOIN restaurants r ON r.id = d.restaurant_id
        WHERE d.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(drink_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_drink(
    pool: &PgPool,
    drink_id: i64,
    tenant_id: i64,
    data: &DrinkUpdate,
) -> Result<Option<Drink>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE drinks d SET
            name = COALESCE($1, d.name),
            description = COALESCE($2, d.description),
            price = COALESCE($3, d.price),
            category = COALESCE($4, d.category),
            is_alcoholic = COALESCE($5, d.is_alcoholic),
            is_available = COALESCE($6, d.is_available),
            updated_at = $7
        FROM restaurants r
        WHERE d.restaurant_id = r.id AND d.id = $8 AND r.tenant_id = $9
        RETURNING d.id, d.restaurant_id, d.name, d.description, d.price, d.category,
                  d.is_alcoholic, d.is_available, d.created_at, d.updated_at
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.category)
    .bind(data.is_alcoholic)
    .bind(data.is_available)
    .bind(now_millis())
    .bind(drink_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_drink(
    pool: &PgPool,
    drink_id: i64,
    tenant_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM drinks d
        USING restaurants r
        WHERE d.restaurant_id = r.id AND d.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(drink_id)
    .bind(tenant_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
