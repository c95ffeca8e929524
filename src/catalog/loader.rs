//! Scenario catalog loading and selection
//!
//! The catalog is read once at startup from a JSON document. A load failure
//! is logged and yields an empty catalog rather than an error: the bot stays
//! up and reports "no scenario available" when asked for one.

use std::path::Path;
use rand::Rng;
use serde::Deserialize;
use tracing::{info, error};

use crate::utils::errors::{MedBuddyError, Result};
use super::scenario::{Difficulty, Scenario};

/// Top-level shape of the scenario catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

/// Picks one scenario among those matching the requested difficulty.
///
/// Production uses a uniformly-random pick; tests inject a fixed choice.
pub trait ScenarioChooser: Send + Sync {
    fn choose(&self, count: usize) -> usize;
}

/// Uniformly-random chooser backed by the thread-local RNG
#[derive(Debug, Clone, Default)]
pub struct RandomChooser;

impl ScenarioChooser for RandomChooser {
    fn choose(&self, count: usize) -> usize {
        rand::thread_rng().gen_range(0..count)
    }
}

/// Deterministic chooser returning a fixed index (clamped), for tests
#[derive(Debug, Clone)]
pub struct FixedChooser(pub usize);

impl ScenarioChooser for FixedChooser {
    fn choose(&self, count: usize) -> usize {
        self.0.min(count.saturating_sub(1))
    }
}

/// Immutable library of patient scenarios, loaded once at startup
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
    chooser: Box<dyn ScenarioChooser>,
}

impl ScenarioCatalog {
    /// Load the catalog from a JSON file.
    ///
    /// Never fails: an unreadable or malformed file logs an error and
    /// produces an empty catalog.
    pub fn load(path: impl AsRef<Path>) -> Self {
        Self::load_with_chooser(path, Box::new(RandomChooser))
    }

    /// Load the catalog with an injected selection strategy
    pub fn load_with_chooser(path: impl AsRef<Path>, chooser: Box<dyn ScenarioChooser>) -> Self {
        let path = path.as_ref();
        let scenarios = match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<CatalogFile>(&raw) {
                Ok(file) => {
                    info!(path = %path.display(), count = file.scenarios.len(), "Loaded scenario catalog");
                    file.scenarios
                }
                Err(e) => {
                    error!(path = %path.display(), error = %e, "Failed to parse scenario catalog");
                    Vec::new()
                }
            },
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to read scenario catalog");
                Vec::new()
            }
        };

        Self { scenarios, chooser }
    }

    /// Build a catalog from already-parsed scenarios (tests, fixtures)
    pub fn from_scenarios(scenarios: Vec<Scenario>, chooser: Box<dyn ScenarioChooser>) -> Self {
        Self { scenarios, chooser }
    }

    /// Number of scenarios in the catalog
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Number of scenarios matching a difficulty tier
    pub fn count_for(&self, difficulty: Difficulty) -> usize {
        self.scenarios.iter().filter(|s| s.difficulty == difficulty).count()
    }

    /// Select a random scenario of the requested difficulty.
    ///
    /// Errors when no scenario in the catalog carries that tier.
    pub fn select(&self, difficulty: Difficulty) -> Result<&Scenario> {
        let suitable: Vec<&Scenario> = self
            .scenarios
            .iter()
            .filter(|s| s.difficulty == difficulty)
            .collect();

        if suitable.is_empty() {
            return Err(MedBuddyError::NoScenarioAvailable {
                difficulty: difficulty.to_string(),
            });
        }

        let index = self.chooser.choose(suitable.len());
        Ok(suitable[index])
    }
}

impl std::fmt::Debug for ScenarioCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioCatalog")
            .field("scenarios", &self.scenarios.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_scenario(id: &str, difficulty: Difficulty) -> Scenario {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "difficulty": difficulty.as_str(),
            "initial_complaint": "I feel unwell.",
            "symptoms": {},
            "correct_diagnosis": "Flu",
            "patient_gender": "male"
        }))
        .unwrap()
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"scenarios": [{{
                "id": "case_001",
                "difficulty": "beginner",
                "initial_complaint": "I have a cough.",
                "symptoms": {{}},
                "correct_diagnosis": "Bronchitis",
                "patient_gender": "female"
            }}]}}"#
        )
        .unwrap();

        let catalog = ScenarioCatalog::load(file.path());
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.count_for(Difficulty::Beginner), 1);
    }

    #[test]
    fn test_load_missing_file_yields_empty_catalog() {
        let catalog = ScenarioCatalog::load("does/not/exist.json");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_malformed_file_yields_empty_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let catalog = ScenarioCatalog::load(file.path());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_select_matches_difficulty() {
        let scenarios = vec![
            sample_scenario("b1", Difficulty::Beginner),
            sample_scenario("a1", Difficulty::Advanced),
            sample_scenario("b2", Difficulty::Beginner),
        ];
        let catalog = ScenarioCatalog::from_scenarios(scenarios, Box::new(RandomChooser));

        for _ in 0..20 {
            let picked = catalog.select(Difficulty::Beginner).unwrap();
            assert_eq!(picked.difficulty, Difficulty::Beginner);
        }
    }

    #[test]
    fn test_select_empty_tier_errors() {
        let scenarios = vec![sample_scenario("b1", Difficulty::Beginner)];
        let catalog = ScenarioCatalog::from_scenarios(scenarios, Box::new(RandomChooser));

        let err = catalog.select(Difficulty::Advanced).unwrap_err();
        assert!(matches!(err, MedBuddyError::NoScenarioAvailable { .. }));
    }

    #[test]
    fn test_fixed_chooser_is_deterministic() {
        let scenarios = vec![
            sample_scenario("b1", Difficulty::Beginner),
            sample_scenario("b2", Difficulty::Beginner),
            sample_scenario("b3", Difficulty::Beginner),
        ];
        let catalog = ScenarioCatalog::from_scenarios(scenarios, Box::new(FixedChooser(1)));

        assert_eq!(catalog.select(Difficulty::Beginner).unwrap().id, "b2");
        assert_eq!(catalog.select(Difficulty::Beginner).unwrap().id, "b2");
    }
}
