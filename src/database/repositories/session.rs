//! Session repository implementation
//!
//! Records completed consultations and answers statistics queries.

use sqlx::PgPool;
use chrono::Utc;
use crate::dialog::SessionSummary;
use crate::models::session::{Session, UserStatistics};
use crate::utils::errors::MedBuddyError;

#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record one completed consultation for a user
    pub async fn record(&self, user_id: i64, summary: &SessionSummary) -> Result<Session, MedBuddyError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (user_id, scenario_id, difficulty, correct_diagnosis, questions_asked, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, scenario_id, difficulty, correct_diagnosis, questions_asked, created_at
            "#
        )
        .bind(user_id)
        .bind(&summary.scenario_id)
        .bind(summary.difficulty.as_str())
        .bind(summary.correct_diagnosis)
        .bind(summary.questions_asked as i32)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(session)
    }

    /// Aggregate practice statistics for a user
    pub async fn statistics_for(&self, user_id: i64) -> Result<UserStatistics, MedBuddyError> {
        let row: (i64, i64, Option<f64>) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE correct_diagnosis),
                   AVG(questions_asked::float8)
            FROM sessions WHERE user_id = $1
            "#
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(UserStatistics {
            total_sessions: row.0,
            correct_diagnoses: row.1,
            average_questions: row.2.unwrap_or(0.0),
        })
    }
}
