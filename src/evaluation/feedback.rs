//! Consultation feedback rendering
//!
//! Turns a match result into the user-facing summary sent after a diagnosis
//! is submitted. The bot teaches medical English to Russian speakers, so the
//! coaching text is Russian while the consultation itself stays in English.

use crate::catalog::Scenario;
use super::matcher::{MatchResult, MatchTier};

/// Build the feedback message for a completed consultation
pub fn build_feedback(
    result: &MatchResult,
    diagnosis: &str,
    scenario: &Scenario,
    questions_asked: usize,
) -> String {
    let correct = &scenario.correct_diagnosis;

    let mut feedback = match result.tier {
        MatchTier::Exact => format!(
            "🎉 Отличная работа! Диагноз поставлен верно!\n\n\
             📋 Детали консультации:\n\
             • Диагноз: {correct}\n\
             • Задано вопросов: {questions_asked}"
        ),
        MatchTier::Close => format!(
            "✅ Диагноз верный!\n\n\
             📋 Детали консультации:\n\
             • Ваш диагноз: {diagnosis}\n\
             • Правильное написание: {correct}\n\
             • Задано вопросов: {questions_asked}"
        ),
        MatchTier::Partial => format!(
            "👍 Почти верно! Вы определили основное заболевание.\n\n\
             📋 Детали консультации:\n\
             • Ваш диагноз: {diagnosis}\n\
             • Полный диагноз: {correct}\n\
             • Задано вопросов: {questions_asked}"
        ),
        MatchTier::None => format!(
            "⚠️ Диагноз близок, но требует уточнения.\n\n\
             📋 Детали консультации:\n\
             • Ваш диагноз: {diagnosis}\n\
             • Правильный диагноз: {correct}\n\
             • Задано вопросов: {questions_asked}\n\n\
             💡 Совет: Попробуйте уточнить тип или причину заболевания"
        ),
    };

    if result.tier != MatchTier::Exact && !result.missed_questions.is_empty() {
        feedback.push_str("\n\n💡 Для улучшения диагностики:\nРекомендуемые вопросы:\n");
        feedback.push_str(
            &result
                .missed_questions
                .iter()
                .map(|q| format!("• {q}"))
                .collect::<Vec<_>>()
                .join("\n"),
        );
    }

    feedback
}

/// Build the medical terms glossary message, or None when the scenario
/// defines no terms
pub fn build_terms_message(scenario: &Scenario) -> Option<String> {
    if scenario.medical_terms.is_empty() {
        return None;
    }

    let mut message = "📚 Медицинские термины по данному случаю:\n\n".to_string();
    let mut terms: Vec<_> = scenario.medical_terms.values().collect();
    terms.sort_by(|a, b| a.en.cmp(&b.en));
    for term in terms {
        message.push_str(&format!("• {} - {}\n", term.en, term.ru));
    }

    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Difficulty;
    use crate::evaluation::matcher::evaluate;

    fn scenario() -> Scenario {
        serde_json::from_value(serde_json::json!({
            "id": "case_001",
            "difficulty": Difficulty::Beginner.as_str(),
            "initial_complaint": "I have a bad cough.",
            "symptoms": {"cough": "Productive cough"},
            "correct_diagnosis": "Bacterial Pneumonia",
            "hints": ["Do you have a fever?"],
            "patient_gender": "female",
            "medical_terms": {
                "sputum": {"en": "sputum", "ru": "мокрота"},
                "fever": {"en": "fever", "ru": "жар"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_exact_feedback_omits_missed_questions() {
        let scenario = scenario();
        let result = evaluate("Bacterial Pneumonia", &scenario.correct_diagnosis, &scenario.hints, &[]);
        let feedback = build_feedback(&result, "Bacterial Pneumonia", &scenario, 4);

        assert!(feedback.contains("Отличная работа"));
        assert!(feedback.contains("Задано вопросов: 4"));
        assert!(!feedback.contains("Рекомендуемые вопросы"));
    }

    #[test]
    fn test_missed_questions_listed_for_wrong_diagnosis() {
        let scenario = scenario();
        let result = evaluate("cold", &scenario.correct_diagnosis, &scenario.hints, &[]);
        let feedback = build_feedback(&result, "cold", &scenario, 0);

        assert!(feedback.contains("Рекомендуемые вопросы"));
        assert!(feedback.contains("• Do you have a fever?"));
    }

    #[test]
    fn test_terms_message_sorted_and_bilingual() {
        let message = build_terms_message(&scenario()).unwrap();
        assert!(message.contains("• fever - жар"));
        assert!(message.contains("• sputum - мокрота"));
        // Sorted by English term
        assert!(message.find("fever").unwrap() < message.find("sputum").unwrap());
    }

    #[test]
    fn test_no_terms_yields_none() {
        let mut scenario = scenario();
        scenario.medical_terms.clear();
        assert!(build_terms_message(&scenario).is_none());
    }
}
