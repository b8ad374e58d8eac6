use std::sync::Arc;

use storage::repository::TestRepository;
use testdesk_core::model::{
    GroupId, NewTestCase, SubGroupId, TestCase, TestId, TestResult, TestUpdate,
};

use crate::auth::CredentialSource;
use crate::error::TestCaseServiceError;

/// Persists edits to individual test cases.
#[derive(Clone)]
pub struct TestCaseService {
    credentials: Arc<dyn CredentialSource>,
    tests: Arc<dyn TestRepository>,
}

impl TestCaseService {
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialSource>, tests: Arc<dyn TestRepository>) -> Self {
        Self { credentials, tests }
    }

    /// Save the result and observation of one test.
    ///
    /// # Errors
    ///
    /// Returns `TestCaseServiceError::Storage` if the service rejects the update.
    pub async fn save(
        &self,
        id: &TestId,
        result: TestResult,
        observation: Option<String>,
    ) -> Result<(), TestCaseServiceError> {
        let update = TestUpdate::new(result, observation);
        let auth = self.credentials.credentials();
        self.tests
            .update_test(&auth, id, &update)
            .await
            .inspect_err(|err| tracing::error!(test = %id, error = %err, "failed to save test"))?;
        tracing::info!(test = %id, result = %update.result, "test saved");
        Ok(())
    }

    /// Delete one test.
    ///
    /// # Errors
    ///
    /// Returns `TestCaseServiceError::Storage` if the service rejects the delete.
    pub async fn delete(&self, id: &TestId) -> Result<(), TestCaseServiceError> {
        let auth = self.credentials.credentials();
        self.tests
            .delete_test(&auth, id)
            .await
            .inspect_err(|err| tracing::error!(test = %id, error = %err, "failed to delete test"))?;
        tracing::info!(test = %id, "test deleted");
        Ok(())
    }

    /// Create a test under a group/subgroup.
    ///
    /// # Errors
    ///
    /// Returns `TestCaseServiceError::NewTest` if the use case is blank.
    /// Returns `TestCaseServiceError::Storage` if the service rejects the request.
    pub async fn create(
        &self,
        group_id: GroupId,
        sub_group_id: SubGroupId,
        use_case: String,
        description: Option<String>,
    ) -> Result<TestCase, TestCaseServiceError> {
        let new = NewTestCase::new(group_id, sub_group_id, use_case, description)?;
        let auth = self.credentials.credentials();
        let created = self
            .tests
            .create_test(&auth, &new)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to create test"))?;
        tracing::info!(test = %created.id(), "test created");
        Ok(created)
    }
}
