//! Per-user conversation state tracking
//!
//! The tracker owns every active consultation, keyed by Telegram user id.
//! A user has at most one active state; starting a new consultation replaces
//! the old one outright. The tracker itself does no locking; the dialog
//! service serializes access to it.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::catalog::{Difficulty, Scenario, ScenarioCatalog};
use crate::utils::errors::Result;

/// Sentinel reply when a user interacts without an active consultation
pub const NO_ACTIVE_CONVERSATION: &str = "Please start a dialogue first!";

/// State of one active consultation
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub difficulty: Difficulty,
    pub scenario: Scenario,
    /// Chronological log of the questions the user asked
    pub questions_asked: Vec<String>,
    /// Whether the submitted diagnosis was graded as correct
    pub diagnosis_made: bool,
}

/// Derived record of a completed consultation, handed to persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub scenario_id: String,
    pub difficulty: Difficulty,
    pub questions_asked: usize,
    pub correct_diagnosis: bool,
}

/// Tracks active consultations for all users
pub struct ConversationTracker {
    catalog: Arc<ScenarioCatalog>,
    active: HashMap<i64, ConversationState>,
}

impl ConversationTracker {
    pub fn new(catalog: Arc<ScenarioCatalog>) -> Self {
        Self {
            catalog,
            active: HashMap::new(),
        }
    }

    /// Start a consultation, replacing any prior state for this user.
    ///
    /// Errors only when the catalog has no scenario for the tier.
    pub fn start(&mut self, user_id: i64, difficulty: Difficulty) -> Result<&ConversationState> {
        let scenario = self.catalog.select(difficulty)?.clone();
        debug!(user_id = user_id, scenario_id = %scenario.id, difficulty = %difficulty, "Starting conversation");

        let state = ConversationState {
            difficulty,
            scenario,
            questions_asked: Vec::new(),
            diagnosis_made: false,
        };
        self.active.insert(user_id, state);
        Ok(&self.active[&user_id])
    }

    /// Whether the user has an active consultation
    pub fn is_active(&self, user_id: i64) -> bool {
        self.active.contains_key(&user_id)
    }

    /// Append a question to the user's log.
    ///
    /// A no-op with a warning when the user is inactive or the text is
    /// empty; never an error.
    pub fn record_question(&mut self, user_id: i64, question: &str) {
        match self.active.get_mut(&user_id) {
            Some(state) => {
                if question.is_empty() {
                    warn!(user_id = user_id, "Ignoring empty question");
                    return;
                }
                state.questions_asked.push(question.to_string());
                debug!(
                    user_id = user_id,
                    total_questions = state.questions_asked.len(),
                    "Question recorded"
                );
            }
            None => {
                warn!(user_id = user_id, "Question for inactive conversation ignored");
            }
        }
    }

    /// Current consultation state, if any
    pub fn get_context(&self, user_id: i64) -> Option<&ConversationState> {
        self.active.get(&user_id)
    }

    /// The patient's opening complaint, or the sentinel when inactive
    pub fn initial_prompt(&self, user_id: i64) -> String {
        match self.active.get(&user_id) {
            Some(state) => state.scenario.initial_complaint.clone(),
            None => NO_ACTIVE_CONVERSATION.to_string(),
        }
    }

    /// Record the outcome of the diagnosis evaluation
    pub fn mark_diagnosis(&mut self, user_id: i64, correct: bool) {
        if let Some(state) = self.active.get_mut(&user_id) {
            state.diagnosis_made = correct;
        } else {
            warn!(user_id = user_id, "Diagnosis mark for inactive conversation ignored");
        }
    }

    /// End the consultation and produce its summary.
    ///
    /// Returns None (and stays a no-op) when the user has no active state,
    /// so a summary is emitted at most once per consultation.
    pub fn end(&mut self, user_id: i64) -> Option<SessionSummary> {
        let state = self.active.remove(&user_id)?;
        debug!(user_id = user_id, scenario_id = %state.scenario.id, "Ending conversation");

        Some(SessionSummary {
            scenario_id: state.scenario.id,
            difficulty: state.difficulty,
            questions_asked: state.questions_asked.len(),
            correct_diagnosis: state.diagnosis_made,
        })
    }

    /// Number of active consultations
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl std::fmt::Debug for ConversationTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationTracker")
            .field("active", &self.active.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FixedChooser;

    fn catalog() -> Arc<ScenarioCatalog> {
        let scenarios = vec![
            serde_json::from_value(serde_json::json!({
                "id": "case_001",
                "difficulty": "beginner",
                "initial_complaint": "I have a bad cough and fever.",
                "symptoms": {"cough": "Productive cough"},
                "correct_diagnosis": "Bacterial Pneumonia",
                "hints": ["Do you have a fever?"],
                "patient_gender": "female"
            }))
            .unwrap(),
            serde_json::from_value(serde_json::json!({
                "id": "case_101",
                "difficulty": "advanced",
                "initial_complaint": "My chest hurts when I breathe.",
                "symptoms": {},
                "correct_diagnosis": "Pleurisy",
                "patient_gender": "male"
            }))
            .unwrap(),
        ];
        Arc::new(ScenarioCatalog::from_scenarios(scenarios, Box::new(FixedChooser(0))))
    }

    #[test]
    fn test_start_then_active() {
        let mut tracker = ConversationTracker::new(catalog());
        assert!(!tracker.is_active(1));

        tracker.start(1, Difficulty::Beginner).unwrap();
        assert!(tracker.is_active(1));
        assert_eq!(tracker.get_context(1).unwrap().scenario.id, "case_001");
    }

    #[test]
    fn test_start_replaces_prior_state() {
        let mut tracker = ConversationTracker::new(catalog());
        tracker.start(1, Difficulty::Beginner).unwrap();
        tracker.record_question(1, "Do you smoke?");

        tracker.start(1, Difficulty::Advanced).unwrap();
        let state = tracker.get_context(1).unwrap();
        assert_eq!(state.scenario.id, "case_101");
        assert!(state.questions_asked.is_empty());
        assert!(!state.diagnosis_made);
    }

    #[test]
    fn test_start_unavailable_tier_errors() {
        let mut tracker = ConversationTracker::new(catalog());
        assert!(tracker.start(1, Difficulty::Intermediate).is_err());
        assert!(!tracker.is_active(1));
    }

    #[test]
    fn test_question_log_preserves_order() {
        let mut tracker = ConversationTracker::new(catalog());
        tracker.start(1, Difficulty::Beginner).unwrap();

        tracker.record_question(1, "How long have you been sick?");
        tracker.record_question(1, "");
        tracker.record_question(1, "Do you have a fever?");

        let log = &tracker.get_context(1).unwrap().questions_asked;
        assert_eq!(
            log,
            &vec![
                "How long have you been sick?".to_string(),
                "Do you have a fever?".to_string(),
            ]
        );
    }

    #[test]
    fn test_record_question_inactive_is_noop() {
        let mut tracker = ConversationTracker::new(catalog());
        tracker.record_question(42, "Anyone there?");
        assert!(tracker.get_context(42).is_none());
    }

    #[test]
    fn test_initial_prompt() {
        let mut tracker = ConversationTracker::new(catalog());
        assert_eq!(tracker.initial_prompt(1), NO_ACTIVE_CONVERSATION);

        tracker.start(1, Difficulty::Beginner).unwrap();
        assert_eq!(tracker.initial_prompt(1), "I have a bad cough and fever.");
    }

    #[test]
    fn test_end_emits_summary_once() {
        let mut tracker = ConversationTracker::new(catalog());
        tracker.start(1, Difficulty::Beginner).unwrap();
        tracker.record_question(1, "Do you have a fever?");
        tracker.mark_diagnosis(1, true);

        let summary = tracker.end(1).unwrap();
        assert_eq!(
            summary,
            SessionSummary {
                scenario_id: "case_001".to_string(),
                difficulty: Difficulty::Beginner,
                questions_asked: 1,
                correct_diagnosis: true,
            }
        );

        assert!(!tracker.is_active(1));
        assert!(tracker.end(1).is_none());
    }

    #[test]
    fn test_end_never_started_is_noop() {
        let mut tracker = ConversationTracker::new(catalog());
        assert!(tracker.end(7).is_none());
    }

    #[test]
    fn test_users_do_not_interfere() {
        let mut tracker = ConversationTracker::new(catalog());
        tracker.start(1, Difficulty::Beginner).unwrap();
        tracker.start(2, Difficulty::Advanced).unwrap();

        tracker.record_question(1, "Where does it hurt?");
        tracker.record_question(2, "When did the pain start?");
        tracker.record_question(2, "Does breathing make it worse?");

        assert_eq!(tracker.get_context(1).unwrap().questions_asked.len(), 1);
        assert_eq!(tracker.get_context(2).unwrap().questions_asked.len(), 2);
        assert_eq!(tracker.get_context(1).unwrap().scenario.id, "case_001");
        assert_eq!(tracker.get_context(2).unwrap().scenario.id, "case_101");

        assert_eq!(tracker.active_count(), 2);
        tracker.end(1);
        assert_eq!(tracker.active_count(), 1);
        assert!(!tracker.is_active(1));
        assert!(tracker.is_active(2));
    }
}
