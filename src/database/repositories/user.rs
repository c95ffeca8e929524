//! User repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::user::{CreateUserRequest, User};
use crate::utils::errors::MedBuddyError;

#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, MedBuddyError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (telegram_id, username, voice_mode, current_level, created_at)
            VALUES ($1, $2, FALSE, 'beginner', $3)
            RETURNING id, telegram_id, username, voice_mode, current_level, created_at
            "#
        )
        .bind(request.telegram_id)
        .bind(request.username)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by Telegram ID
    pub async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<User>, MedBuddyError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, telegram_id, username, voice_mode, current_level, created_at FROM users WHERE telegram_id = $1"
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get an existing user or create a fresh record
    pub async fn get_or_create(&self, telegram_id: i64, username: Option<String>) -> Result<User, MedBuddyError> {
        if let Some(user) = self.find_by_telegram_id(telegram_id).await? {
            return Ok(user);
        }

        self.create(CreateUserRequest { telegram_id, username }).await
    }

    /// Toggle voice mode and return the new value
    pub async fn toggle_voice_mode(&self, telegram_id: i64) -> Result<bool, MedBuddyError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET voice_mode = NOT voice_mode
            WHERE telegram_id = $1
            RETURNING id, telegram_id, username, voice_mode, current_level, created_at
            "#
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(MedBuddyError::UserNotFound { user_id: telegram_id })?;

        Ok(user.voice_mode)
    }

    /// Remember the difficulty the user last practiced at
    pub async fn set_current_level(&self, telegram_id: i64, level: &str) -> Result<(), MedBuddyError> {
        sqlx::query("UPDATE users SET current_level = $2 WHERE telegram_id = $1")
            .bind(telegram_id)
            .bind(level)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
