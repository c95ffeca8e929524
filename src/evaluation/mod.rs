//! Diagnosis evaluation module
//!
//! Pure scoring of submitted diagnoses: string similarity, word matching,
//! medical synonym families, tier assignment, and feedback rendering.

pub mod feedback;
pub mod matcher;
pub mod similarity;

pub use feedback::{build_feedback, build_terms_message};
pub use matcher::{evaluate, normalize_text, MatchResult, MatchTier};
pub use similarity::similarity_ratio;
