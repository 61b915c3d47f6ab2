//! Menu queries, including the menu ↔ plate/drink join tables

use shared::models::{Drink, Menu, MenuCreate, MenuUpdate, Plate};
use shared::util::now_millis;
use sqlx::PgPool;

const COLUMNS: &str = "id, restaurant_id, name, description, category, is_active, created_at, updated_at";

pub async fn create_menu(pool: &PgPool, data: &MenuCreate) -> Result<Menu, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        INSERT INTO menus (restaurant_id, name, description, category, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING {COLUMNS}
        "#,
    ))
    .bind(data.restaurant_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.category)
    .bind(data.is_active.unwrap_or(true))
    .bind(now_millis())
    .fetch_one(pool)
    .await
}

pub async fn list_menus(
    pool: &PgPool,
    tenant_id: i64,
    restaurant_id: Option<i64>,
    is_active: Option<bool>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Menu>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT m.id, m.restaurant_id, m.name, m.description, m.category, m.is_active,
               m.created_at, m.updated_at
        FROM menus m
        JOIN restaurants r ON r.id = m.restaurant_id
        WHERE r.tenant_id = $1
          AND ($2::BIGINT IS NULL OR m.restaurant_id = $2)
          AND ($3::BOOLEAN IS NULL OR m.is_active = $3)
        ORDER BY m.id
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(tenant_id)
    .bind(restaurant_id)
    .bind(is_active)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_menus(
    pool: &PgPool,
    tenant_id: i64,
    restaurant_id: Option<i64>,
    is_active: Option<bool>,
) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM menus m
        JOIN restaurants r ON r.id = m.restaurant_id
        WHERE r.tenant_id = $1
          AND ($2::BIGINT IS NULL OR m.restaurant_id = $2)
          AND ($3::BOOLEAN IS NULL OR m.is_active = $3)
        "#,
    )
    .bind(tenant_id)
    .bind(restaurant_id)
    .bind(is_active)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn get_menu(
    pool: &PgPool,
    menu_id: i64,
    tenant_id: i64,
) -> Result<Option<Menu>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT m.id, m.restaurant_id, m.name, m.description, m.category, m.is_active,
               m.created_at, m.updated_at
        FROM menus m
        JOIN restaurants r ON r.id = m.restaurant_id
        WHERE m.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(menu_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_menu(
    pool: &PgPool,
    menu_id: i64,
    tenant_id: i64,
    data: &MenuUpdate,
) -> Result<Option<Menu>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE menus m SET
            name = COALESCE($1, m.name),
            description = COALESCE($2, m.description),
            category = COALESCE($3, m.category),
            is_active = COALESCE($4, m.is_active),
            updated_at = $5
        FROM restaurants r
        WHERE m.restaurant_id = r.id AND m.id = $6 AND r.tenant_id = $7
        RETURNING m.id, m.restaurant_id, m.name, m.description, m.category, m.is_active,
                  m.created_at, m.updated_at
        "#,
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.category)
    .bind(data.is_active)
    .bind(now_millis())
    .bind(menu_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_menu(
    pool: &PgPool,
    menu_id: i64,
    tenant_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM menus m
        USING restaurants r
        WHERE m.restaurant_id = r.id AND m.id = $1 AND r.tenant_id = $2
        "#,
    )
    .bind(menu_id)
    .bind(tenant_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn plates_for_menu(pool: &PgPool, menu_id: i64) -> Result<Vec<Plate>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT p.id, p.restaurant_id, p.name, p.description, p.price, p.category,
               p.is_available, p.created_at, p.updated_at
        FROM plates p
        JOIN menu_plates mp ON mp.plate_id = p.id
        WHERE mp.menu_id = $1
        ORDER BY p.name
        "#,
    )
    .bind(menu_id)
    .fetch_all(pool)
    .await
}

pub async fn drinks_for_menu(pool: &PgPool, menu_id: i64) -> Result<Vec<Drink>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT d.id, d.restaurant_id, d.name, d.description, d.price, d.category,
               d.is_alcoholic, d.is_available, d.created_at, d.updated_at
        FROM drinks d
        JOIN menu_drinks md ON md.drink_id = d.id
        WHERE md.menu_id = $1
        ORDER BY d.name
        "#,
    )
    .bind(menu_id)
    .fetch_all(pool)
    .await
}

/// Attach a plate to a menu. Idempotent.
pub async fn attach_plate(pool: &PgPool, menu_id: i64, plate_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO menu_plates (menu_id, plate_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(menu_id)
    .bind(plate_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn detach_plate(
    pool: &PgPool,
    menu_id: i64,
    plate_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM menu_plates WHERE menu_id = $1 AND plate_id = $2")
        .bind(menu_id)
        .bind(plate_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Attach a drink to a menu. Idempotent.
pub async fn attach_drink(pool: &PgPool, menu_id: i64, drink_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO menu_drinks (menu_id, drink_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(menu_id)
    .bind(drink_id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn detach_drink(
    pool: &PgPool,
    menu_id: i64,
    drink_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM menu_drinks WHERE menu_id = $1 AND drink_id = $2")
        .bind(menu_id)
        .bind(drink_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
