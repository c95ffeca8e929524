//! Conversation state module
//!
//! Tracks which scenario each user is working through, the questions they
//! ask, and the outcome of their diagnosis.

pub mod service;
pub mod tracker;

pub use service::DialogService;
pub use tracker::{ConversationState, ConversationTracker, SessionSummary, NO_ACTIVE_CONVERSATION};
