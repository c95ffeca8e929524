//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{DatabasePool, SessionRepository, UserRepository};
use crate::models::{User, UserStatistics};
use crate::utils::errors::MedBuddyError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub sessions: SessionRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool),
        }
    }

    /// Initialize a new user in the system
    pub async fn initialize_user(&self, telegram_id: i64, username: Option<String>) -> Result<User, MedBuddyError> {
        self.users.get_or_create(telegram_id, username).await
    }

    /// Practice statistics for a Telegram user
    pub async fn user_statistics(&self, telegram_id: i64) -> Result<UserStatistics, MedBuddyError> {
        let user = self
            .users
            .find_by_telegram_id(telegram_id)
            .await?
            .ok_or(MedBuddyError::UserNotFound { user_id: telegram_id })?;

        self.sessions.statistics_for(user.id).await
    }
}
