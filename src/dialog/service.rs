//! Dialog service
//!
//! The boundary between the Telegram handlers and the consultation core.
//! Owns the tracker behind a mutex so per-user events are serialized, keeps
//! the awaiting-diagnosis flags, and forwards each completed session to the
//! database exactly once. Storage failures are logged here and never reach
//! the caller; the in-memory state is discarded regardless.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::catalog::{Difficulty, ScenarioCatalog};
use crate::database::DatabaseService;
use crate::evaluation::{self, MatchResult};
use crate::utils::errors::Result;
use super::tracker::{ConversationState, ConversationTracker, SessionSummary};

/// Service driving consultation lifecycles for the bot handlers
pub struct DialogService {
    tracker: Mutex<ConversationTracker>,
    awaiting_diagnosis: Mutex<HashSet<i64>>,
    last_replies: Mutex<HashMap<i64, String>>,
    database: DatabaseService,
}

impl DialogService {
    pub fn new(catalog: Arc<ScenarioCatalog>, database: DatabaseService) -> Self {
        Self {
            tracker: Mutex::new(ConversationTracker::new(catalog)),
            awaiting_diagnosis: Mutex::new(HashSet::new()),
            last_replies: Mutex::new(HashMap::new()),
            database,
        }
    }

    /// Start a consultation for the user, returning a snapshot of the state
    pub async fn start(&self, user_id: i64, difficulty: Difficulty) -> Result<ConversationState> {
        let mut tracker = self.tracker.lock().await;
        let state = tracker.start(user_id, difficulty)?.clone();
        self.awaiting_diagnosis.lock().await.remove(&user_id);
        info!(user_id = user_id, scenario_id = %state.scenario.id, difficulty = %difficulty, "Conversation started");
        Ok(state)
    }

    pub async fn is_active(&self, user_id: i64) -> bool {
        self.tracker.lock().await.is_active(user_id)
    }

    pub async fn record_question(&self, user_id: i64, question: &str) {
        self.tracker.lock().await.record_question(user_id, question);
    }

    /// Snapshot of the user's consultation state, if active
    pub async fn get_context(&self, user_id: i64) -> Option<ConversationState> {
        self.tracker.lock().await.get_context(user_id).cloned()
    }

    pub async fn initial_prompt(&self, user_id: i64) -> String {
        self.tracker.lock().await.initial_prompt(user_id)
    }

    /// Flag that the user's next text message is a diagnosis
    pub async fn set_awaiting_diagnosis(&self, user_id: i64) {
        self.awaiting_diagnosis.lock().await.insert(user_id);
    }

    /// Consume the awaiting-diagnosis flag; true when it was set
    pub async fn take_awaiting_diagnosis(&self, user_id: i64) -> bool {
        self.awaiting_diagnosis.lock().await.remove(&user_id)
    }

    /// Remember the patient's latest reply for the transcription button
    pub async fn set_last_reply(&self, user_id: i64, reply: &str) {
        self.last_replies.lock().await.insert(user_id, reply.to_string());
    }

    /// The patient's latest reply, if one has been sent
    pub async fn last_reply(&self, user_id: i64) -> Option<String> {
        self.last_replies.lock().await.get(&user_id).cloned()
    }

    /// Evaluate a submitted diagnosis against the active consultation.
    ///
    /// Returns None when the user has no active consultation. On success the
    /// diagnosis-made flag is recorded so the session summary reflects it.
    pub async fn submit_diagnosis(
        &self,
        user_id: i64,
        diagnosis: &str,
    ) -> Option<(MatchResult, ConversationState)> {
        let mut tracker = self.tracker.lock().await;
        let state = tracker.get_context(user_id)?.clone();

        let result = evaluation::evaluate(
            diagnosis,
            &state.scenario.correct_diagnosis,
            &state.scenario.hints,
            &state.questions_asked,
        );
        tracker.mark_diagnosis(user_id, result.tier.is_correct());

        info!(
            user_id = user_id,
            scenario_id = %state.scenario.id,
            tier = result.tier.as_str(),
            questions_asked = state.questions_asked.len(),
            "Diagnosis evaluated"
        );

        Some((result, state))
    }

    /// End the consultation and persist its summary.
    ///
    /// A no-op when the user is inactive. The summary is forwarded to the
    /// database once; a storage failure is logged and swallowed, leaving the
    /// session out of history but the user experience intact.
    pub async fn end(&self, user_id: i64) {
        let summary = {
            let mut tracker = self.tracker.lock().await;
            let summary = tracker.end(user_id);
            info!(
                user_id = user_id,
                active_conversations = tracker.active_count(),
                "Conversation ended"
            );
            summary
        };
        self.awaiting_diagnosis.lock().await.remove(&user_id);
        self.last_replies.lock().await.remove(&user_id);

        if let Some(summary) = summary {
            self.persist_summary(user_id, &summary).await;
        }
    }

    async fn persist_summary(&self, telegram_id: i64, summary: &SessionSummary) {
        match self.database.users.find_by_telegram_id(telegram_id).await {
            Ok(Some(user)) => {
                if let Err(e) = self.database.sessions.record(user.id, summary).await {
                    error!(user_id = telegram_id, error = %e, "Failed to persist session summary");
                } else {
                    info!(
                        user_id = telegram_id,
                        scenario_id = %summary.scenario_id,
                        correct = summary.correct_diagnosis,
                        "Session summary persisted"
                    );
                }
            }
            Ok(None) => {
                error!(user_id = telegram_id, "No database user for session summary");
            }
            Err(e) => {
                error!(user_id = telegram_id, error = %e, "Failed to look up user for session summary");
            }
        }
    }
}

impl std::fmt::Debug for DialogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogService").finish_non_exhaustive()
    }
}
