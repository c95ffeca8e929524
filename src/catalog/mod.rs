//! Scenario catalog module
//!
//! Loads the fixed library of patient cases and selects one per
//! conversation, keyed by difficulty tier.

pub mod loader;
pub mod scenario;

pub use loader::{FixedChooser, RandomChooser, ScenarioCatalog, ScenarioChooser};
pub use scenario::{Difficulty, MedicalTerm, PatientGender, Scenario};
