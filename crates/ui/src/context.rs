use std::sync::Arc;

use services::{CatalogService, SessionService, TestCaseService};
use testdesk_core::model::CurrentUser;

use crate::vm::SessionErrorPolicy;

pub trait UiApp: Send + Sync {
    fn current_user(&self) -> Option<CurrentUser>;
    fn session_error_policy(&self) -> SessionErrorPolicy;

    fn catalog(&self) -> Arc<CatalogService>;
    fn test_cases(&self) -> Arc<TestCaseService>;
    fn sessions(&self) -> Arc<SessionService>;
}

#[derive(Clone)]
pub struct AppContext {
    current_user: Option<CurrentUser>,
    session_error_policy: SessionErrorPolicy,

    catalog: Arc<CatalogService>,
    test_cases: Arc<TestCaseService>,
    sessions: Arc<SessionService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            current_user: app.current_user(),
            session_error_policy: app.session_error_policy(),
            catalog: app.catalog(),
            test_cases: app.test_cases(),
            sessions: app.sessions(),
        }
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    #[must_use]
    pub fn session_error_policy(&self) -> SessionErrorPolicy {
        self.session_error_policy
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
