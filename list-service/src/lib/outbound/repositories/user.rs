use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserPreferences;
use crate::domain::user::models::UserRole;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const EMAIL_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: PgRow) -> Result<User, UserError> {
        let name: String = row.get("name");
        let role: String = row.get("role");
        let preferences: Json<UserPreferences> = row.get("preferences");

        Ok(User {
            id: UserId(row.get("id")),
            email: EmailAddress::new(row.get("email"))?,
            password_hash: row.get("password_hash"),
            name: if name.is_empty() {
                None
            } else {
                Some(DisplayName::new(name)?)
            },
            role: role.parse::<UserRole>()?,
            preferences: preferences.0,
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        })
    }

    fn map_write_error(e: sqlx::Error, email: &EmailAddress) -> UserError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some(EMAIL_CONSTRAINT) {
                return UserError::EmailAlreadyExists(email.to_string());
            }
        }
        UserError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, name, role, preferences, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.name.as_ref().map_or("", |n| n.as_str()))
        .bind(user.role.as_str())
        .bind(Json(user.preferences))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &user.email))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, name, role, preferences, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, name, role, preferences, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_user).transpose()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, name = $4, role = $5, preferences = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.name.as_ref().map_or("", |n| n.as_str()))
        .bind(user.role.as_str())
        .bind(Json(user.preferences))
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match Self::map_write_error(e, &user.email) {
            UserError::EmailAlreadyExists(email) => UserError::EmailInUse(email),
            other => other,
        })?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }

    async fn delete_with_data(&self, id: &UserId) -> Result<(), UserError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM items WHERE user_id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM lists WHERE user_id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
