//! Patient scenario data model
//!
//! A scenario is a fixed patient case: the complaint the patient opens with,
//! the symptoms the AI patient can speak about, the correct diagnosis, and
//! the questions a thorough examiner is expected to ask.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Difficulty tier of a patient scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parse a difficulty from callback data or user input
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    /// Canonical lowercase name, matching the catalog file and the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Gender of the simulated patient, used to pick a synthesis voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientGender {
    Male,
    Female,
}

/// Bilingual rendering of a medical term shown after the consultation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicalTerm {
    pub en: String,
    pub ru: String,
}

/// A fixed patient case loaded from the scenario catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario identifier
    pub id: String,
    /// Difficulty tier
    pub difficulty: Difficulty,
    /// What the patient says when the consultation opens
    pub initial_complaint: String,
    /// Symptom name -> description, fed to the AI patient prompt
    pub symptoms: HashMap<String, String>,
    /// The diagnosis the user is expected to reach
    pub correct_diagnosis: String,
    /// Recommended questions a thorough examiner would ask
    #[serde(default)]
    pub hints: Vec<String>,
    /// Patient gender tag
    pub patient_gender: PatientGender,
    /// Optional term -> {en, ru} glossary for post-consultation review
    #[serde(default)]
    pub medical_terms: HashMap<String, MedicalTerm>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("beginner"), Some(Difficulty::Beginner));
        assert_eq!(Difficulty::parse("Intermediate"), Some(Difficulty::Intermediate));
        assert_eq!(Difficulty::parse("ADVANCED"), Some(Difficulty::Advanced));
        assert_eq!(Difficulty::parse("expert"), None);
    }

    #[test]
    fn test_scenario_deserialization() {
        let json = r#"{
            "id": "case_001",
            "difficulty": "beginner",
            "initial_complaint": "I have a bad cough and fever.",
            "symptoms": {"cough": "Productive cough with green sputum"},
            "correct_diagnosis": "Bacterial Pneumonia",
            "hints": ["How long have you had the cough?"],
            "patient_gender": "female",
            "medical_terms": {"sputum": {"en": "sputum", "ru": "мокрота"}}
        }"#;

        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.id, "case_001");
        assert_eq!(scenario.difficulty, Difficulty::Beginner);
        assert_eq!(scenario.patient_gender, PatientGender::Female);
        assert_eq!(scenario.hints.len(), 1);
        assert_eq!(scenario.medical_terms["sputum"].ru, "мокрота");
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "id": "case_002",
            "difficulty": "advanced",
            "initial_complaint": "My chest hurts.",
            "symptoms": {},
            "correct_diagnosis": "Angina",
            "patient_gender": "male"
        }"#;

        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert!(scenario.hints.is_empty());
        assert!(scenario.medical_terms.is_empty());
    }
}
