//! PostgreSQL Credential Store

use sqlx::PgPool;

use crate::domain::entity::{app::App, user::User};
use crate::domain::repository::{
    AppProvider, StoreError, StoreResult, UserProvider, UserSaver,
};
use crate::domain::value_object::{
    app_id::AppId, app_secret::AppSecret, email::Email, user_id::UserId,
    user_password::UserPassword,
};

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::backend(err)
    }
}

/// Unique violation on insert means the email is taken
fn map_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::UserExists;
        }
    }
    StoreError::from(err)
}

// ============================================================================
// Users
// ============================================================================

impl UserSaver for PgCredentialStore {
    async fn save_user(&self, email: &str, password_hash: &UserPassword) -> StoreResult<UserId> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, pass_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(password_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(UserId::new(id))
    }
}

impl UserProvider for PgCredentialStore {
    async fn user(&self, email: &str) -> StoreResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(StoreError::UserNotFound)?.into_user()
    }

    async fn is_admin(&self, user_id: UserId) -> StoreResult<bool> {
        let is_admin: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT is_admin
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        is_admin.ok_or(StoreError::UserNotFound)
    }
}

// ============================================================================
// Apps
// ============================================================================

impl AppProvider for PgCredentialStore {
    async fn app(&self, app_id: AppId) -> StoreResult<App> {
        let row = sqlx::query_as::<_, AppRow>(
            r#"
            SELECT id, name, secret
            FROM apps
            WHERE id = $1
            "#,
        )
        .bind(app_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.ok_or(StoreError::AppNotFound)?.into_app())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    pass_hash: String,
}

impl UserRow {
    fn into_user(self) -> StoreResult<User> {
        // A row whose hash does not parse is corrupt, not a wrong password
        let password_hash =
            UserPassword::from_phc_string(self.pass_hash).map_err(StoreError::backend)?;

        Ok(User::new(
            UserId::new(self.id),
            Email::from_db(self.email),
            password_hash,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct AppRow {
    id: i64,
    name: String,
    /// Raw key bytes (`BYTEA`)
    secret: Vec<u8>,
}

impl AppRow {
    fn into_app(self) -> App {
        App::new(
            AppId::new(self.id),
            self.name,
            AppSecret::new(self.secret),
        )
    }
}
