//! Diagnosis matching
//!
//! Grades a free-text diagnosis against the scenario's correct answer using
//! three strategies at once: whole-string similarity, per-word similarity,
//! and a fixed table of medical synonym families. The submitted text never
//! produces an error; garbage normalizes to an empty string and lands in the
//! lowest tier.

use std::collections::HashSet;

use super::similarity::similarity_ratio;

/// Per-word similarity threshold for counting a user word as matching
const WORD_MATCH_THRESHOLD: f64 = 0.7;

/// Whole-string / word-ratio threshold for the close tier
const CLOSE_THRESHOLD: f64 = 0.6;

/// Whole-string / word-ratio threshold for the partial tier
const PARTIAL_THRESHOLD: f64 = 0.35;

/// Accepted spelling and inflection variants, grouped by canonical term.
///
/// A user text and a correct text that each contain a variant from the same
/// family count as naming the same condition.
const MEDICAL_VARIATIONS: &[(&str, &[&str])] = &[
    ("pneumonia", &["pneumonia", "pheumonia", "pneumoniae", "pneumonic", "pneumo"]),
    ("bacterial", &["bacterial", "bacteriological", "bacterium", "bacteria"]),
    ("strep", &["strep", "streptococcal", "streptococcus"]),
    ("viral", &["viral", "virus"]),
    ("infection", &["infection", "infected", "infectious"]),
];

// Overlaps with the pneumonia family above; both checks are kept as the
// grading scale was tuned with them, and dropping one could shift tier
// boundaries.
const PNEUMONIA_SPELLINGS: &[&str] = &["pneumonia", "pheumonia", "pneumonic"];

/// Graded outcome of comparing a submitted diagnosis to the correct one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// Verbatim match, ignoring case
    Exact,
    /// Same condition, imperfect wording or spelling
    Close,
    /// The main disease was identified but not pinned down
    Partial,
    /// No meaningful overlap
    None,
}

impl MatchTier {
    /// Whether this tier counts as a correct diagnosis for session history
    pub fn is_correct(&self) -> bool {
        matches!(self, MatchTier::Exact | MatchTier::Close)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::Close => "close",
            MatchTier::Partial => "partial",
            MatchTier::None => "none",
        }
    }
}

/// Result of evaluating one diagnosis submission
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub tier: MatchTier,
    /// Recommended questions the user never asked; empty on an exact match
    pub missed_questions: Vec<String>,
}

/// Evaluate a submitted diagnosis against the correct answer.
///
/// `hints` are the scenario's recommended questions and `asked` is the
/// chronological question log of the conversation.
pub fn evaluate(diagnosis: &str, correct_diagnosis: &str, hints: &[String], asked: &[String]) -> MatchResult {
    // Surrounding whitespace is never part of an answer
    let diagnosis = diagnosis.trim();
    let correct_diagnosis = correct_diagnosis.trim();

    let user_norm = normalize_text(diagnosis);
    let correct_norm = normalize_text(correct_diagnosis);

    let full_similarity = similarity_ratio(&user_norm, &correct_norm);
    let word_match_ratio = word_match_ratio(diagnosis, correct_diagnosis);

    let user_lower = diagnosis.to_lowercase();
    let correct_lower = correct_diagnosis.to_lowercase();

    let is_exact = user_lower == correct_lower;
    let is_close = full_similarity > CLOSE_THRESHOLD
        || word_match_ratio > CLOSE_THRESHOLD
        || has_medical_term_match(&user_lower, &correct_lower)
        || (PNEUMONIA_SPELLINGS.iter().any(|term| user_lower.contains(term))
            && PNEUMONIA_SPELLINGS.iter().any(|term| correct_lower.contains(term)));
    let is_partial = full_similarity > PARTIAL_THRESHOLD || word_match_ratio > PARTIAL_THRESHOLD;

    let tier = if is_exact {
        MatchTier::Exact
    } else if is_close {
        MatchTier::Close
    } else if is_partial {
        MatchTier::Partial
    } else {
        MatchTier::None
    };

    let missed_questions = if tier == MatchTier::Exact {
        Vec::new()
    } else {
        missed_questions(hints, asked)
    };

    MatchResult { tier, missed_questions }
}

/// Lowercase and strip every non-alphanumeric character
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Share of correct-diagnosis words the user matched (per-word similarity)
fn word_match_ratio(diagnosis: &str, correct_diagnosis: &str) -> f64 {
    let user_words: HashSet<String> = diagnosis.split_whitespace().map(normalize_text).collect();
    let correct_words: HashSet<String> =
        correct_diagnosis.split_whitespace().map(normalize_text).collect();

    if correct_words.is_empty() {
        return 0.0;
    }

    let matching = user_words
        .iter()
        .filter(|uw| {
            correct_words
                .iter()
                .any(|cw| similarity_ratio(uw, cw) > WORD_MATCH_THRESHOLD)
        })
        .count();

    matching as f64 / correct_words.len() as f64
}

/// True when both texts contain a variant from the same synonym family
fn has_medical_term_match(user_text: &str, correct_text: &str) -> bool {
    MEDICAL_VARIATIONS.iter().any(|(_, variants)| {
        variants.iter().any(|v| user_text.contains(v))
            && variants.iter().any(|v| correct_text.contains(v))
    })
}

/// Recommended questions minus the ones actually asked, in hint order
fn missed_questions(hints: &[String], asked: &[String]) -> Vec<String> {
    if hints.is_empty() {
        return Vec::new();
    }

    let asked: HashSet<&str> = asked.iter().map(String::as_str).collect();
    hints
        .iter()
        .filter(|hint| !asked.contains(hint.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hints() -> Vec<String> {
        vec![
            "How long have you had these symptoms?".to_string(),
            "Do you have a fever?".to_string(),
            "Have you been around anyone who is sick?".to_string(),
        ]
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let result = evaluate("bacterial pneumonia", "Bacterial Pneumonia", &hints(), &[]);
        assert_eq!(result.tier, MatchTier::Exact);
        assert!(result.missed_questions.is_empty());
    }

    #[test]
    fn test_exact_match_survives_surrounding_whitespace() {
        let result = evaluate("bacterial pneumonia ", "Bacterial Pneumonia", &hints(), &[]);
        assert_eq!(result.tier, MatchTier::Exact);

        let result = evaluate("  Bacterial Pneumonia\n", "Bacterial Pneumonia", &hints(), &[]);
        assert_eq!(result.tier, MatchTier::Exact);
        assert!(result.missed_questions.is_empty());
    }

    #[test]
    fn test_exact_match_ignores_asked_questions() {
        let asked = vec!["Do you have a fever?".to_string()];
        let result = evaluate("Bacterial Pneumonia", "Bacterial Pneumonia", &hints(), &asked);
        assert_eq!(result.tier, MatchTier::Exact);
        assert!(result.missed_questions.is_empty());
    }

    #[test]
    fn test_term_family_match_is_close() {
        // Not exact, but both texts name the pneumonia family
        let result = evaluate("pneumonia", "Bacterial Pneumonia", &hints(), &[]);
        assert_eq!(result.tier, MatchTier::Close);
    }

    #[test]
    fn test_misspelled_term_is_close() {
        let result = evaluate("pheumonia", "Bacterial Pneumonia", &hints(), &[]);
        assert_eq!(result.tier, MatchTier::Close);
    }

    #[test]
    fn test_unrelated_diagnosis_is_none() {
        let asked = vec!["Do you have a fever?".to_string()];
        let result = evaluate("cold", "Bacterial Pneumonia", &hints(), &asked);
        assert_eq!(result.tier, MatchTier::None);
        assert_eq!(
            result.missed_questions,
            vec![
                "How long have you had these symptoms?".to_string(),
                "Have you been around anyone who is sick?".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_diagnosis_is_none() {
        let result = evaluate("", "Bacterial Pneumonia", &hints(), &[]);
        assert_eq!(result.tier, MatchTier::None);
        assert_eq!(result.missed_questions.len(), 3);
    }

    #[test]
    fn test_punctuation_only_differences_are_exact_after_case_fold() {
        // Case folding happens before normalization for the exact check
        let result = evaluate("FLU", "flu", &[], &[]);
        assert_eq!(result.tier, MatchTier::Exact);
    }

    #[test]
    fn test_partial_match_on_word_overlap() {
        // Word ratio is 1/3 and full similarity sits between the partial
        // and close thresholds, so only the partial gate opens
        let result = evaluate(
            "chronic bronchitis",
            "acute bronchitis fibrosis",
            &[],
            &[],
        );
        assert_eq!(result.tier, MatchTier::Partial);
    }

    #[test]
    fn test_no_hints_means_no_missed_questions() {
        let result = evaluate("cold", "Bacterial Pneumonia", &[], &[]);
        assert_eq!(result.tier, MatchTier::None);
        assert!(result.missed_questions.is_empty());
    }

    #[test]
    fn test_tier_correctness_flag() {
        assert!(MatchTier::Exact.is_correct());
        assert!(MatchTier::Close.is_correct());
        assert!(!MatchTier::Partial.is_correct());
        assert!(!MatchTier::None.is_correct());
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("Bacterial Pneumonia!"), "bacterialpneumonia");
        assert_eq!(normalize_text("  -- "), "");
        assert_eq!(normalize_text("COVID-19"), "covid19");
    }
}
