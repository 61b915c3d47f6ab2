//! Account and membership queries

use shared::models::{Account, AccountUpdate, Membership, MembershipRole, Tenant};
use shared::util::now_millis;
use sqlx::PgPool;

const ACCOUNT_COLUMNS: &str = "id, username, email, first_name, last_name, created_at, updated_at";

/// Account row including the password hash. Only the db and login path
/// ever see this; it is converted to [`Account`] before leaving.
#[derive(sqlx::FromRow)]
pub struct AccountAuthRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl AccountAuthRow {
    pub fn into_account(self) -> Account {
        Account {
            id: self.id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Insert a new account; when `tenant_name` is given, also create the
/// tenant and an owner membership in the same transaction.
pub async fn create_account(
    pool: &PgPool,
    username: &str,
    email: &str,
    hashed_password: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
    tenant_name: Option<&str>,
) -> Result<(Account, Option<Tenant>), sqlx::Error> {
    let now = now_millis();
    let mut tx = pool.begin().await?;

    let account: Account = sqlx::query_as(&format!(
        r#"
        INSERT INTO accounts (username, email, hashed_password, first_name, last_name, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        RETURNING {ACCOUNT_COLUMNS}
        "#,
    ))
    .bind(username)
    .bind(email)
    .bind(hashed_password)
    .bind(first_name)
    .bind(last_name)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let tenant = match tenant_name {
        Some(name) => {
            let tenant: Tenant = sqlx::query_as(
                r#"
                INSERT INTO tenants (name, domain, created_at, updated_at)
                VALUES ($1, NULL, $2, $2)
                RETURNING id, name, domain, created_at, updated_at
                "#,
            )
            .bind(name)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

            sqlx::query(
                "INSERT INTO account_tenants (account_id, tenant_id, role, created_at) VALUES ($1, $2, $3, $4)",
            )
            .bind(account.id)
            .bind(tenant.id)
            .bind(MembershipRole::Owner.as_str())
            .bind(now)
            .execute(&mut *tx)
            .await?;

            Some(tenant)
        }
        None => None,
    };

    tx.commit().await?;
    Ok((account, tenant))
}

pub async fn find_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<AccountAuthRow>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, username, email, hashed_password, first_name, last_name, created_at, updated_at
        FROM accounts
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn memberships_for_account(
    pool: &PgPool,
    account_id: i64,
) -> Result<Vec<Membership>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT account_id, tenant_id, role, created_at
        FROM account_tenants
        WHERE account_id = $1
        ORDER BY created_at
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await
}

/// List accounts that are members of the given tenant.
pub async fn list_accounts(
    pool: &PgPool,
    tenant_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<Account>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT a.id, a.username, a.email, a.first_name, a.last_name, a.created_at, a.updated_at
        FROM accounts a
        JOIN account_tenants m ON m.account_id = a.id
        WHERE m.tenant_id = $1
        ORDER BY a.id
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(tenant_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn count_accounts(pool: &PgPool, tenant_id: i64) -> Result<i64, sqlx::Error> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM account_tenants WHERE tenant_id = $1")
            .bind(tenant_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Fetch an account, but only if it belongs to the given tenant.
pub async fn get_account(
    pool: &PgPool,
    account_id: i64,
    tenant_id: i64,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT a.id, a.username, a.email, a.first_name, a.last_name, a.created_at, a.updated_at
        FROM accounts a
        JOIN account_tenants m ON m.account_id = a.id
        WHERE a.id = $1 AND m.tenant_id = $2
        "#,
    )
    .bind(account_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

/// Partial update. `hashed_password` is set only when a password change
/// was requested (the handler re-hashes before calling).
pub async fn update_account(
    pool: &PgPool,
    account_id: i64,
    data: &AccountUpdate,
    hashed_password: Option<&str>,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        UPDATE accounts SET
            username = COALESCE($1, username),
            email = COALESCE($2, email),
            hashed_password = COALESCE($3, hashed_password),
            first_name = COALESCE($4, first_name),
            last_name = COALESCE($5, last_name),
            updated_at = $6
        WHERE id = $7
        RETURNING {ACCOUNT_COLUMNS}
        "#,
    ))
    .bind(&data.username)
    .bind(&data.email)
    .bind(hashed_password)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(now_millis())
    .bind(account_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_account(pool: &PgPool, account_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
        .bind(account_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
