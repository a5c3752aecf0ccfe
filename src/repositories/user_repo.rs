use async_trait::async_trait;
use chrono::Utc;
use tracing::instrument;

use crate::{
    models::users::{UpdateProfileDto, User},
    Result,
};

use super::SqliteRepo;

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, password, created_at";

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn user_by_id(&self, user_id: i64) -> Result<Option<User>>;
    async fn user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        password_hash: &str,
    ) -> Result<User>;
    async fn update_profile(&self, user_id: i64, update: &UpdateProfileDto) -> Result<User>;
}

#[async_trait]
impl UserRepository for SqliteRepo {
    #[instrument(skip(self))]
    async fn user_by_id(&self, user_id: i64) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        tracing::debug!(user_found = user.is_some(), "user query completed");

        Ok(user)
    }

    async fn create_user(
        &self,
        username: &str,
        email: &str,
        first_name: &str,
        last_name: &str,
        password_hash: &str,
    ) -> Result<User> {
        let sql = format!(
            r#"
            INSERT INTO users (username, email, first_name, last_name, password, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(email)
            .bind(first_name)
            .bind(last_name)
            .bind(password_hash)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    async fn update_profile(&self, user_id: i64, update: &UpdateProfileDto) -> Result<User> {
        let sql = format!(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                email = COALESCE($3, email),
                first_name = COALESCE($4, first_name),
                last_name = COALESCE($5, last_name)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .bind(update.username.as_deref())
            .bind(update.email.as_deref())
            .bind(update.first_name.as_deref())
            .bind(update.last_name.as_deref())
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }
}
