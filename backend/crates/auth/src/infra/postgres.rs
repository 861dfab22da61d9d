//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    display_name::DisplayName, user_handle::UserHandle, user_id::UserId,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    handle,
    display_name,
    display_name_canonical,
    password_hash,
    user_role,
    last_login_at,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                handle,
                display_name,
                display_name_canonical,
                password_hash,
                user_role,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.handle.as_str())
        .bind(user.display_name.original())
        .bind(user.display_name.canonical())
        .bind(user.password_hash.as_phc_string())
        .bind(user.user_role.id())
        .bind(user.last_login_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_handle(&self, handle: &UserHandle) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE handle = $1"
        ))
        .bind(handle.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_display_name(&self, display_name: &DisplayName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE display_name_canonical = $1"
        ))
        .bind(display_name.canonical())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_handle(&self, handle: &UserHandle) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE handle = $1)",
        )
        .bind(handle.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_display_name(&self, display_name: &DisplayName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE display_name_canonical = $1)",
        )
        .bind(display_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                handle = $2,
                display_name = $3,
                display_name_canonical = $4,
                password_hash = $5,
                user_role = $6,
                last_login_at = $7,
                updated_at = $8
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.handle.as_str())
        .bind(user.display_name.original())
        .bind(user.display_name.canonical())
        .bind(user.password_hash.as_phc_string())
        .bind(user.user_role.id())
        .bind(user.last_login_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    handle: String,
    display_name: String,
    #[allow(dead_code)]
    display_name_canonical: String,
    password_hash: String,
    user_role: i16,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let handle = UserHandle::from_db(&self.handle)
            .map_err(|e| AuthError::Internal(format!("Invalid handle: {e}")))?;

        let display_name = DisplayName::from_db(&self.display_name)
            .map_err(|e| AuthError::Internal(format!("Invalid display_name: {e}")))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            handle,
            display_name,
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            user_role: UserRole::from_id(self.user_role),
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
