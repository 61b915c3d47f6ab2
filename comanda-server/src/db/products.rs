//! Product (inventory) queries

use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::util::now_millis;
use sqlx::PgPool;

pub async fn create_product(pool: &PgPool, data: &ProductCreate) -> Result<Product, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO products (restaurant_id, name, description, unit, price, stock, min_stock, allergens, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
        RETURNING id, restaurant_id, name, description, unit, price, stock, min_stock,
                  allergens, created_at, updated_at
        "#,
    )
    .bind(data.restaurant_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.unit)
    .bind(data.price)
    .bind(data.stock.unwrap_or(0))
    .bind(data.min_stock.unwrap_or(0))
    .bind(&data.allergens)
    .bind(now_millis())
    .fetch_one(pool)
    .await
}

pub async fn list_products(
    pool: &PgPool,
    tenant_id: i64,
    restaurant_id: Option<i64>,
    below_min_stock: bool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Product>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT p.id, p.restaurant_id, p.name, p.description, p.unit, p.price, p.stock,
               p.min_stock, p.allergens, p.created_at, p.updated_at
        FROM products p
        JOIN restaurants r ON r.id = p.restaurant_id
        WHERE r.tenant_id = $1
          AND ($2::BIGINT IS NULL OR p.restaurant_id = $2)
          AND (NOT $3 OR p.stock < p.min_stock)
        ORDER BY p.id
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(tenant_id)
    .bind(restaurant_id)
    .bind(below_min_stock)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_products(
    pool: &PgPool,
    tenant_id: i64,
    restaurant_id: Option<i64>,
    below_min_stock: bool,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM products p
        JOIN restaurants r ON r.id = p.restaurant_id
        WHERE r.tenant_id = $1
          AND ($2::BIGINT IS NULL OR p.restaurant_id = $2)
          AND (NOT $3 OR p.stock < p.min_stock)
        "#,
    )
    .bind(tenant_id)
    .bind(restaurant_id)
    .bind(below_min_stock)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn get_product(
    pool: &PgPool,
    product_id: i64,
    tenant_id: i64,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT p.id, p.restaurant_id, p.name, p.description, p.unit, p.price, p.stock,
               p.min_stock, p.allergens, p.created_at, p.updated_at
        FROM products p
        JOIN restaurants r ON r.id = p.restaurant_id
        WHERE p.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(product_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_product(
    pool: &PgPool,
    product_id: i64,
    tenant_id: i64,
    data: &ProductUpdate,
) -> Result<Option<Product>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE products p SET
            name = COALESCE($1, p.name),
            description = COALESCE($2, p.description),
            unit = COALESCE($3, p.unit),
            price = COALESCE($4, p.price),
            stock = COALESCE($5, p.stock),
            min_stock = COALESCE($6, p.min_stock),
            allergens = COALESCE($7, p.allergens),
            updated_at = $8
        FROM restaurants r
        WHERE p.restaurant_id = r.id AND p.id = $9 AND r.tenant_id = $10
        RETURNING p.id, p.restaurant_id, p.name, p.description, p.unit, p.price, p.stock,
                  p.min_stock, p.allergens, p.created_at, p.updated_at
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.unit)
    .bind(data.price)
    .bind(data.stock)
    .bind(data.min_stock)
    .bind(&data.allergens)
    .bind(now_millis())
    .bind(product_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_product(
    pool: &PgPool,
    product_id: i64,
    tenant_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM products p
        USING restaurants r
        WHERE p.restaurant_id = r.id AND p.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(product_id)
    .bind(tenant_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}
