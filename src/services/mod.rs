//! Services module
//!
//! This module contains business logic services

pub mod openai;

// Re-export commonly used services
pub use openai::OpenAiService;

use std::sync::Arc;

use crate::catalog::ScenarioCatalog;
use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::dialog::DialogService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub dialog_service: Arc<DialogService>,
    pub openai_service: OpenAiService,
    pub database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: Settings,
        catalog: Arc<ScenarioCatalog>,
        database: DatabaseService,
    ) -> Result<Self> {
        let dialog_service = Arc::new(DialogService::new(catalog, database.clone()));
        let openai_service = OpenAiService::new(settings.openai.clone())?;

        Ok(Self {
            dialog_service,
            openai_service,
            database,
        })
    }
}

impl std::fmt::Debug for ServiceFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceFactory").finish_non_exhaustive()
    }
}
