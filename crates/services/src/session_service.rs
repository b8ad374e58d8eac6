use std::sync::Arc;

use storage::repository::SessionRepository;
use testdesk_core::model::{NewSession, Session};

use crate::auth::CredentialSource;
use crate::error::SessionServiceError;

/// Client for the remote session endpoints.
#[derive(Clone)]
pub struct SessionService {
    credentials: Arc<dyn CredentialSource>,
    sessions: Arc<dyn SessionRepository>,
}

impl SessionService {
    #[must_use]
    pub fn new(
        credentials: Arc<dyn CredentialSource>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            credentials,
            sessions,
        }
    }

    /// Start a session for the given scope, technician and tests.
    ///
    /// Performs no validation; the service is the authority. Not retried.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError::Storage` if the call fails.
    pub async fn start_session(
        &self,
        session: &NewSession,
    ) -> Result<Option<Session>, SessionServiceError> {
        let auth = self.credentials.credentials();
        let started = self
            .sessions
            .start_session(&auth, session)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to start test session"))?;
        tracing::info!(
            tests = session.test_count(),
            technician = ?session.technician,
            "test session started"
        );
        Ok(started)
    }

    /// Fetch every session.
    ///
    /// # Errors
    ///
    /// Returns `SessionServiceError::Storage` if the call fails.
    pub async fn list_sessions(&self) -> Result<Vec<Session>, SessionServiceError> {
        let auth = self.credentials.credentials();
        let sessions = self
            .sessions
            .list_sessions(&auth)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to list sessions"))?;
        Ok(sessions)
    }
}
