//! Plate queries, including the recipe (plate ↔ product) join table

use shared::models::{Plate, PlateCreate, PlateRecipeItem, PlateUpdate};
use shared::util::now_millis;
use sqlx::PgPool;

pub async fn create_plate(pool: &PgPool, data: &PlateCreate) -> Result<Plate, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO plates (restaurant_id, name, description, price, category, is_available, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
        RETURNING id, restaurant_id, name, description, price, category, is_available,
                  created_at, updated_at
        "#,
    )
    .bind(data.restaurant_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.category)
    .bind(data.is_available.unwrap_or(true))
    .bind(now_millis())
    .fetch_one(pool)
    .await
}

#[allow(clippy::too_many_arguments)]
pub async fn list_plates(
    pool: &PgPool,
    tenant_id: i64,
    restaurant_id: Option<i64>,
    category: Option<&str>,
    is_available: Option<bool>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Plate>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT p.id, p.restaurant_id, p.name, p.description, p.price, p.category,
               p.is_available, p.created_at, p.updated_at
        FROM plates p
        JOIN restaurants r ON r.id = p.restaurant_id
        WHERE r.tenant_id = $1
          AND ($2::BIGINT IS NULL OR p.restaurant_id = $2)
          AND ($3::TEXT IS NULL OR p.category = $3)
          AND ($4::BOOLEAN IS NULL OR p.is_available = $4)
        ORDER BY p.id
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

pub async fn count_plates(
    pool: &PgPool,
    tenant_id: i64,
    restaurant_id: Option<i64>,
    category: Option<&str>,
    is_available: Option<bool>,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM plates p
        JOIN restaurants r ON r.id = p.restaurant_id
        WHERE r.tenant_id = $1
          AND ($2::BIGINT IS NULL OR p.restaurant_id = $2)
          AND ($3::TEXT IS NULL OR p.category = $3)
          AND ($4::BOOLEAN IS NULL OR p.is_available = $4)
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

pub async fn get_plate(
    pool: &PgPool,
    plate_id: i64,
    tenant_id: i64,
) -> Result<Option<Plate>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT p.id, p.restaurant_id, p.name, p.description, p.price, p.category,
               p.is_available, p.created_at, p.updated_at
        FROM plates p
        JOIN restaurants r ON r.id = p.restaurant_id
        WHERE p.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(plate_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_plate(
    pool: &PgPool,
    plate_id: i64,
    tenant_id: i64,
    data: &PlateUpdate,
) -> Result<Option<Plate>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE plates p SET
            name = COALESCE($1, p.name),
            description = COALESCE($2, p.description),
            price = COALESCE($3, p.price),
            category = COALESCE($4, p.category),
            is_available = COALESCE($5, p.is_available),
            updated_at = $6
        FROM restaurants r
        WHERE p.restaurant_id = r.id AND p.id = $7 AND r.tenant_id = $8
        RETURNING p.id, p.restaurant_id, p.name, p.description, p.price, p.category,
                  p.is_available, p.created_at, p.updated_at
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.category)
    .bind(data.is_available)
    .bind(now_millis())
    .bind(plate_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_plate(
    pool: &PgPool,
    plate_id: i64,
    tenant_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM plates p
        USING restaurants r
        WHERE p.restaurant_id = r.id AND p.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(plate_id)
    .bind(tenant_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn recipe_for_plate(
    pool: &PgPool,
    plate_id: i64,
) -> Result<Vec<PlateRecipeItem>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT pp.product_id, pr.name AS product_name, pp.quantity
        FROM plate_products pp
        JOIN products pr ON pr.id = pp.product_id
        WHERE pp.plate_id = $1
        ORDER BY pr.name
        "#,
    )
    .bind(plate_id)
    .fetch_all(pool)
    .await
}

/// Set the amount of a product used by a plate (insert or update).
pub async fn set_recipe_item(
    pool: &PgPool,
    plate_id: i64,
    product_id: i64,
    quantity: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO plate_products (plate_id, product_id, quantity)
        VALUES ($1, $2, $3)
        ON CONFLICT (plate_id, product_id) DO UPDATE SET quantity = EXCLUDED.quantity
        "#,
    )
    .bind(plate_id)
    .bind(product_id)
    .bind(quantity)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn remove_recipe_item(
    pool: &PgPool,
    plate_id: i64,
    product_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM plate_products WHERE plate_id = $1 AND product_id = $2")
        .bind(plate_id)
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
