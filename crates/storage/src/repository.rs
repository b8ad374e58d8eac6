use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use testdesk_core::model::{
    Group, NewSession, NewTestCase, Session, SessionId, SubGroup, TestCase, TestId, TestUpdate,
};
use thiserror::Error;

use crate::credentials::Credentials;

/// Errors surfaced by repository backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("service responded with status {0}")]
    Status(u16),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Read access to test groups.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Fetch every group.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the service cannot be reached or rejects the call.
    async fn list_groups(&self, auth: &Credentials) -> Result<Vec<Group>, StorageError>;
}

/// Read access to subgroups.
#[async_trait]
pub trait SubGroupRepository: Send + Sync {
    /// Fetch every subgroup, with its parent reference normalized.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the service cannot be reached or rejects the call.
    async fn list_sub_groups(&self, auth: &Credentials) -> Result<Vec<SubGroup>, StorageError>;
}

#[async_trait]
pub trait TestRepository: Send + Sync {
    /// Fetch every test case.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the service cannot be reached or rejects the call.
    async fn list_tests(&self, auth: &Credentials) -> Result<Vec<TestCase>, StorageError>;

    /// Persist the editable fields of one test.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the test is missing, or other storage errors.
    async fn update_test(
        &self,
        auth: &Credentials,
        id: &TestId,
        update: &TestUpdate,
    ) -> Result<(), StorageError>;

    /// Remove one test.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the test is missing, or other storage errors.
    async fn delete_test(&self, auth: &Credentials, id: &TestId) -> Result<(), StorageError>;

    /// Create a test and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the service rejects the request.
    async fn create_test(
        &self,
        auth: &Credentials,
        new: &NewTestCase,
    ) -> Result<TestCase, StorageError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Start a session. Returns the created session when the service echoes one back.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the service cannot be reached or rejects the call.
    async fn start_session(
        &self,
        auth: &Credentials,
        session: &NewSession,
    ) -> Result<Option<Session>, StorageError>;

    /// Fetch every session. No filtering or pagination.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the service cannot be reached or rejects the call.
    async fn list_sessions(&self, auth: &Credentials) -> Result<Vec<Session>, StorageError>;
}

#[derive(Default)]
struct MemoryState {
    groups: Vec<Group>,
    sub_groups: Vec<SubGroup>,
    tests: Vec<TestCase>,
    sessions: Vec<Session>,
    next_id: u64,
}

impl MemoryState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

/// Simple in-memory backend for testing and prototyping.
///
/// When a required token is configured, calls without that token fail with
/// `StorageError::Unauthorized`, the same way the remote service answers.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
    required_token: Option<String>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_required_token(mut self, token: impl Into<String>) -> Self {
        self.required_token = Some(token.into());
        self
    }

    /// Replace the seeded groups, subgroups and tests.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the internal lock is poisoned.
    pub fn seed(
        &self,
        groups: Vec<Group>,
        sub_groups: Vec<SubGroup>,
        tests: Vec<TestCase>,
    ) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard.groups = groups;
        guard.sub_groups = sub_groups;
        guard.tests = tests;
        Ok(())
    }

    /// Sessions started so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the internal lock is poisoned.
    pub fn started_sessions(&self) -> Result<Vec<Session>, StorageError> {
        Ok(self.lock()?.sessions.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    fn authorize(&self, auth: &Credentials) -> Result<(), StorageError> {
        match self.required_token.as_deref() {
            Some(required) if auth.token() != Some(required) => Err(StorageError::Unauthorized),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl GroupRepository for InMemoryRepository {
    async fn list_groups(&self, auth: &Credentials) -> Result<Vec<Group>, StorageError> {
        self.authorize(auth)?;
        Ok(self.lock()?.groups.clone())
    }
}

#[async_trait]
impl SubGroupRepository for InMemoryRepository {
    async fn list_sub_groups(&self, auth: &Credentials) -> Result<Vec<SubGroup>, StorageError> {
        self.authorize(auth)?;
        Ok(self.lock()?.sub_groups.clone())
    }
}

#[async_trait]
impl TestRepository for InMemoryRepository {
    async fn list_tests(&self, auth: &Credentials) -> Result<Vec<TestCase>, StorageError> {
        self.authorize(auth)?;
        Ok(self.lock()?.tests.clone())
    }

    async fn update_test(
        &self,
        auth: &Credentials,
        id: &TestId,
        update: &TestUpdate,
    ) -> Result<(), StorageError> {
        self.authorize(auth)?;
        let mut guard = self.lock()?;
        let slot = guard
            .tests
            .iter_mut()
            .find(|test| test.id() == id)
            .ok_or(StorageError::NotFound)?;
        let updated = slot
            .clone()
            .with_result(update.result.clone())
            .with_observation(update.observation.clone().unwrap_or_default());
        *slot = updated;
        Ok(())
    }

    async fn delete_test(&self, auth: &Credentials, id: &TestId) -> Result<(), StorageError> {
        self.authorize(auth)?;
        let mut guard = self.lock()?;
        let before = guard.tests.len();
        guard.tests.retain(|test| test.id() != id);
        if guard.tests.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn create_test(
        &self,
        auth: &Credentials,
        new: &NewTestCase,
    ) -> Result<TestCase, StorageError> {
        self.authorize(auth)?;
        let mut guard = self.lock()?;
        let id = TestId::new(guard.next_id("test"));
        let test = TestCase::new(
            id,
            new.group_id.clone(),
            new.sub_group_id.clone(),
            new.use_case.clone(),
        )
        .with_description(new.description.clone());
        guard.tests.push(test.clone());
        Ok(test)
    }
}

#[async_trait]
impl SessionRepository for InMemoryRepository {
    async fn start_session(
        &self,
        auth: &Credentials,
        session: &NewSession,
    ) -> Result<Option<Session>, StorageError> {
        self.authorize(auth)?;
        let mut guard = self.lock()?;
        let started = Session {
            id: SessionId::new(guard.next_id("session")),
            group_id: session.group_id.clone(),
            sub_group_id: session.sub_group_id.clone(),
            technician: session.technician.clone(),
            test_ids: session.tests.iter().map(|test| test.id().clone()).collect(),
            created_at: None,
        };
        guard.sessions.push(started.clone());
        Ok(Some(started))
    }

    async fn list_sessions(&self, auth: &Credentials) -> Result<Vec<Session>, StorageError> {
        self.authorize(auth)?;
        Ok(self.lock()?.sessions.clone())
    }
}

/// Aggregates the remote repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub groups: Arc<dyn GroupRepository>,
    pub sub_groups: Arc<dyn SubGroupRepository>,
    pub tests: Arc<dyn TestRepository>,
    pub sessions: Arc<dyn SessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_memory(&InMemoryRepository::new())
    }

    /// Build a `Storage` whose every repository shares `repo`.
    #[must_use]
    pub fn from_memory(repo: &InMemoryRepository) -> Self {
        Self {
            groups: Arc::new(repo.clone()),
            sub_groups: Arc::new(repo.clone()),
            tests: Arc::new(repo.clone()),
            sessions: Arc::new(repo.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testdesk_core::model::{GroupId, SubGroupId, TestResult, UserId};

    fn build_test(id: &str) -> TestCase {
        TestCase::new(
            TestId::new(id),
            GroupId::new("g1"),
            SubGroupId::new("s1"),
            format!("case {id}"),
        )
    }

    fn seeded() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        repo.seed(
            vec![Group::new(GroupId::new("g1"), "Web")],
            vec![SubGroup::new(
                SubGroupId::new("s1"),
                "Login",
                Some(GroupId::new("g1")),
            )],
            vec![build_test("t1"), build_test("t2")],
        )
        .unwrap();
        repo
    }

    #[tokio::test]
    async fn update_replaces_only_editable_fields() {
        let repo = seeded();
        let auth = Credentials::anonymous();
        let update = TestUpdate::new(TestResult::Passed, Some("ok".into()));
        repo.update_test(&auth, &TestId::new("t1"), &update)
            .await
            .unwrap();

        let tests = repo.list_tests(&auth).await.unwrap();
        assert_eq!(tests[0].result(), &TestResult::Passed);
        assert_eq!(tests[0].observation(), "ok");
        assert_eq!(tests[0].use_case(), "case t1");
        assert_eq!(tests[1].result(), &TestResult::NotTested);
    }

    #[tokio::test]
    async fn delete_missing_test_is_not_found() {
        let repo = seeded();
        let result = repo
            .delete_test(&Credentials::anonymous(), &TestId::new("nope"))
            .await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn required_token_is_enforced() {
        let repo = seeded().with_required_token("abc");
        let denied = repo.list_groups(&Credentials::anonymous()).await;
        assert!(matches!(denied, Err(StorageError::Unauthorized)));

        let groups = repo.list_groups(&Credentials::bearer("abc")).await.unwrap();
        assert_eq!(groups.len(), 1);
    }

    #[tokio::test]
    async fn start_session_records_test_ids() {
        let repo = seeded();
        let auth = Credentials::anonymous();
        let session = NewSession::new(
            Some(GroupId::new("g1")),
            None,
            Some(UserId::new("u1")),
            vec![build_test("t2")],
        );
        let started = repo.start_session(&auth, &session).await.unwrap().unwrap();
        assert_eq!(started.test_ids, vec![TestId::new("t2")]);

        let listed = repo.list_sessions(&auth).await.unwrap();
        assert_eq!(listed, vec![started]);
    }
}
