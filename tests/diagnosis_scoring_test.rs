//! Diagnosis scoring behavior tests
//!
//! Exercises the evaluator through the public API with realistic diagnoses,
//! covering each scoring tier and the missed-question report.

use MedBuddy::evaluation::{evaluate, similarity_ratio, MatchTier};

const CORRECT: &str = "Bacterial Pneumonia";

fn score(diagnosis: &str) -> MatchTier {
    evaluate(diagnosis, CORRECT, &[], &[]).tier
}

#[test]
fn verbatim_answers_are_exact_regardless_of_case() {
    assert_eq!(score("Bacterial Pneumonia"), MatchTier::Exact);
    assert_eq!(score("bacterial pneumonia"), MatchTier::Exact);
    assert_eq!(score("BACTERIAL PNEUMONIA"), MatchTier::Exact);
}

#[test]
fn surrounding_whitespace_keeps_the_answer_exact() {
    assert_eq!(score("bacterial pneumonia "), MatchTier::Exact);
    assert_eq!(score("  Bacterial Pneumonia\n"), MatchTier::Exact);
}

#[test]
fn punctuation_and_extra_spaces_demote_to_close() {
    // The verbatim check fails, but the normalized strings are identical
    assert_eq!(score("bacterial   pneumonia."), MatchTier::Close);
    assert_eq!(score("Bacterial, Pneumonia"), MatchTier::Close);
}

#[test]
fn common_misspelling_scores_close() {
    // "pheumonia" is in the pneumonia spelling family
    assert_eq!(score("bacterial pheumonia"), MatchTier::Close);
}

#[test]
fn synonym_families_score_close() {
    // "bacteria" and "pneumonic" map onto the correct answer's term families
    assert_eq!(score("pneumonic bacteria"), MatchTier::Close);
}

#[test]
fn close_answers_count_as_correct() {
    let tier = score("bacterial pheumonia");
    assert!(tier.is_correct());
    assert!(score("bacterial pneumonia").is_correct());
}

#[test]
fn naming_a_related_bacterial_illness_scores_close() {
    // Both texts name the bacterial family, so the synonym table fires
    // even though the disease itself is wrong
    assert_eq!(score("Bacterial Meningitis"), MatchTier::Close);
}

#[test]
fn shared_disease_word_alone_scores_partial() {
    // One matching word out of three clears only the partial threshold
    let full = similarity_ratio("chronicbronchitis", "acutebronchitisfibrosis");
    assert!(full > 0.35 && full <= 0.6);

    let result = evaluate("chronic bronchitis", "acute bronchitis fibrosis", &[], &[]);
    assert_eq!(result.tier, MatchTier::Partial);
}

#[test]
fn partial_answers_are_not_correct() {
    assert!(!MatchTier::Partial.is_correct());
    assert!(!MatchTier::None.is_correct());
}

#[test]
fn unrelated_diagnosis_scores_none() {
    assert_eq!(score("gout"), MatchTier::None);
}

#[test]
fn empty_submission_scores_none() {
    assert_eq!(score(""), MatchTier::None);
    assert_eq!(score("   "), MatchTier::None);
}

#[test]
fn missed_questions_follow_hint_order() {
    let hints = vec![
        "Do you have a fever?".to_string(),
        "Is the cough productive?".to_string(),
        "Do you smoke?".to_string(),
    ];
    let asked = vec!["Is the cough productive?".to_string()];

    let result = evaluate("gout", CORRECT, &hints, &asked);
    assert_eq!(result.tier, MatchTier::None);
    assert_eq!(
        result.missed_questions,
        vec!["Do you have a fever?".to_string(), "Do you smoke?".to_string()]
    );
}

#[test]
fn exact_answers_skip_the_missed_question_report() {
    let hints = vec!["Do you have a fever?".to_string()];
    let result = evaluate("bacterial pneumonia", CORRECT, &hints, &[]);
    assert_eq!(result.tier, MatchTier::Exact);
    assert!(result.missed_questions.is_empty());
}

#[test]
fn all_hints_asked_leaves_nothing_missed() {
    let hints = vec![
        "Do you have a fever?".to_string(),
        "Do you smoke?".to_string(),
    ];
    let result = evaluate("gout", CORRECT, &hints, &hints);
    assert!(result.missed_questions.is_empty());
}
