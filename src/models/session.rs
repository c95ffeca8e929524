//! Session model
//!
//! One row per completed consultation, derived from a SessionSummary.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub scenario_id: String,
    pub difficulty: String,
    pub correct_diagnosis: bool,
    pub questions_asked: i32,
    pub created_at: DateTime<Utc>,
}

/// Aggregate practice history for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStatistics {
    pub total_sessions: i64,
    pub correct_diagnoses: i64,
    pub average_questions: f64,
}
