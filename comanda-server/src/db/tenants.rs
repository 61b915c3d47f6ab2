//! Tenant and membership queries

use shared::models::{MembershipRole, Tenant, TenantMember, TenantUpdate};
use shared::util::now_millis;
use sqlx::PgPool;

/// Create a tenant and grant the creating account owner membership.
pub async fn create_tenant(
    pool: &PgPool,
    account_id: i64,
    name: &str,
    domain: Option<&str>,
) -> Result<Tenant, sqlx::Error> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let tenant: Tenant = sqlx::query_as(
        r#"
        INSERT INTO tenants (name, domain, created_at, updated_at)
        VALUES ($1, $2, $3, $3)
        RETURNING id, name, domain, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(domain)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO account_tenants (account_id, tenant_id, role, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(account_id)
    .bind(tenant.id)
    .bind(MembershipRole::Owner.as_str())
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(tenant)
}

pub async fn get_tenant(pool: &PgPool, tenant_id: i64) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, name, domain, created_at, updated_at FROM tenants WHERE id = $1",
    )
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn update_tenant(
    pool: &PgPool,
    tenant_id: i64,
    data: &TenantUpdate,
) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as(
        r#"
        UPDATE tenants SET
            name = COALESCE($1, name),
            domain = COALESCE($2, domain),
            updated_at = $3
        WHERE id = $4
        RETURNING id, name, domain, created_at, updated_at
        "#,
    )
    .bind(&data.name)
    .bind(&data.domain)
    .bind(now_millis())
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_tenant(pool: &PgPool, tenant_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tenants WHERE id = $1")
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn list_members(
    pool: &PgPool,
    tenant_id: i64,
) -> Result<Vec<TenantMember>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT m.account_id, a.username, a.email, m.role, m.created_at
        FROM account_tenants m
        JOIN accounts a ON a.id = m.account_id
        WHERE m.tenant_id = $1
        ORDER BY m.created_at
        "#,
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

/// Add a member, or update the role of an existing membership.
pub async fn upsert_member(
    pool: &PgPool,
    tenant_id: i64,
    account_id: i64,
    role: MembershipRole,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO account_tenants (account_id, tenant_id, role, created_at)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (account_id, tenant_id) DO UPDATE SET role = EXCLUDED.role
        "#,
    )
    .bind(account_id)
    .bind(tenant_id)
    .bind(role.as_str())
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn remove_member(
    pool: &PgPool,
    tenant_id: i64,
    account_id: i64,
) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query("DELETE FROM account_tenants WHERE tenant_id = $1 AND account_id = $2")
            .bind(tenant_id)
            .bind(account_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected())
}

/// Does the given account exist at all (for member adds)?
pub async fn account_exists(pool: &PgPool, account_id: i64) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}
