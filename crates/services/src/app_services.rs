use std::sync::Arc;

use storage::{ApiConfig, Storage};

use crate::auth::CredentialSource;
use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::session_service::SessionService;
use crate::test_case_service::TestCaseService;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<CatalogService>,
    test_cases: Arc<TestCaseService>,
    sessions: Arc<SessionService>,
}

impl AppServices {
    /// Build services backed by the remote REST service.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the HTTP backend cannot be built.
    pub fn new_http(
        config: ApiConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::http(config)?;
        Ok(Self::from_storage(&storage, credentials))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, credentials: Arc<dyn CredentialSource>) -> Self {
        let catalog = Arc::new(CatalogService::new(
            Arc::clone(&credentials),
            Arc::clone(&storage.groups),
            Arc::clone(&storage.sub_groups),
            Arc::clone(&storage.tests),
        ));
        let test_cases = Arc::new(TestCaseService::new(
            Arc::clone(&credentials),
            Arc::clone(&storage.tests),
        ));
        let sessions = Arc::new(SessionService::new(
            credentials,
            Arc::clone(&storage.sessions),
        ));

        Self {
            catalog,
            test_cases,
            sessions,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn test_cases(&self) -> Arc<TestCaseService> {
        Arc::clone(&self.test_cases)
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<SessionService> {
        Arc::clone(&self.sessions)
    }
}
