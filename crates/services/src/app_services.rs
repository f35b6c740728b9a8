use std::sync::Arc;

use storage::repository::Storage;
use tutorial_core::{ContentProvider, StaticCatalog};

use crate::error::AppServicesError;
use crate::grammar_service::GrammarService;
use crate::progress_service::ProgressService;
use crate::Clock;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<dyn ContentProvider>,
    progress: Arc<ProgressService>,
    grammars: Arc<GrammarService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// catalog is invalid.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let catalog = Arc::new(StaticCatalog::load()?);
        Ok(Self::from_parts(clock, &storage, catalog))
    }

    /// Build services over an in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Catalog` if the catalog is invalid.
    pub fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        let catalog = Arc::new(StaticCatalog::load()?);
        Ok(Self::from_parts(clock, &Storage::in_memory(), catalog))
    }

    #[must_use]
    pub fn from_parts(clock: Clock, storage: &Storage, catalog: Arc<dyn ContentProvider>) -> Self {
        Self {
            catalog,
            progress: Arc::new(ProgressService::new(clock, Arc::clone(&storage.kv))),
            grammars: Arc::new(GrammarService::new()),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<dyn ContentProvider> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn grammars(&self) -> Arc<GrammarService> {
        Arc::clone(&self.grammars)
    }
}
