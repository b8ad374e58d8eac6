use std::sync::Arc;

use storage::repository::{GroupRepository, SubGroupRepository, TestRepository};
use testdesk_core::model::{Group, SubGroup, TestCase};

use crate::auth::CredentialSource;
use crate::error::CatalogError;

/// Reference data shown by the test list: groups, subgroups and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    pub groups: Vec<Group>,
    pub sub_groups: Vec<SubGroup>,
    pub tests: Vec<TestCase>,
}

/// Loads the reference data the test list is built from.
#[derive(Clone)]
pub struct CatalogService {
    credentials: Arc<dyn CredentialSource>,
    groups: Arc<dyn GroupRepository>,
    sub_groups: Arc<dyn SubGroupRepository>,
    tests: Arc<dyn TestRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        credentials: Arc<dyn CredentialSource>,
        groups: Arc<dyn GroupRepository>,
        sub_groups: Arc<dyn SubGroupRepository>,
        tests: Arc<dyn TestRepository>,
    ) -> Self {
        Self {
            credentials,
            groups,
            sub_groups,
            tests,
        }
    }

    /// Fetch groups, subgroups and tests concurrently.
    ///
    /// The first failure aborts the load and nothing is returned for the
    /// fetches that did succeed.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if any of the three fetches fails.
    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        let auth = self.credentials.credentials();
        let result = futures::try_join!(
            self.groups.list_groups(&auth),
            self.sub_groups.list_sub_groups(&auth),
            self.tests.list_tests(&auth),
        )
        .map(|(groups, sub_groups, tests)| Catalog {
            groups,
            sub_groups,
            tests,
        })
        .map_err(CatalogError::from);

        match &result {
            Ok(catalog) => tracing::debug!(
                groups = catalog.groups.len(),
                sub_groups = catalog.sub_groups.len(),
                tests = catalog.tests.len(),
                "catalog loaded"
            ),
            Err(err) => tracing::error!(error = %err, "failed to load catalog"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use storage::repository::{InMemoryRepository, StorageError};
    use storage::{Credentials, Storage};
    use testdesk_core::model::{GroupId, NewTestCase, SubGroupId, TestId, TestUpdate};
    use tokio::sync::Barrier;

    use crate::auth::StaticCredentials;

    fn service_for(storage: &Storage, token: &str) -> CatalogService {
        CatalogService::new(
            Arc::new(StaticCredentials::bearer(token)),
            Arc::clone(&storage.groups),
            Arc::clone(&storage.sub_groups),
            Arc::clone(&storage.tests),
        )
    }

    #[tokio::test]
    async fn loads_all_reference_data() {
        let repo = InMemoryRepository::new();
        repo.seed(
            vec![Group::new(GroupId::new("g1"), "Web")],
            vec![SubGroup::new(
                SubGroupId::new("s1"),
                "Login",
                Some(GroupId::new("g1")),
            )],
            vec![TestCase::new(
                TestId::new("t1"),
                GroupId::new("g1"),
                SubGroupId::new("s1"),
                "Login ok",
            )],
        )
        .unwrap();

        let catalog = service_for(&Storage::from_memory(&repo), "abc")
            .load()
            .await
            .unwrap();
        assert_eq!(catalog.groups.len(), 1);
        assert_eq!(catalog.sub_groups.len(), 1);
        assert_eq!(catalog.tests.len(), 1);
    }

    #[tokio::test]
    async fn rejected_credentials_fail_the_load() {
        let repo = InMemoryRepository::new().with_required_token("right");
        let result = service_for(&Storage::from_memory(&repo), "wrong")
            .load()
            .await;
        assert!(matches!(
            result,
            Err(CatalogError::Storage(StorageError::Unauthorized))
        ));
    }

    /// Every fetch waits on a shared barrier, so a load only finishes when all
    /// three are in flight together. The subgroup fetch can be made to fail.
    struct BarrierRepo {
        barrier: Barrier,
        fail_sub_groups: bool,
    }

    impl BarrierRepo {
        fn new(fail_sub_groups: bool) -> Self {
            Self {
                barrier: Barrier::new(3),
                fail_sub_groups,
            }
        }
    }

    #[async_trait]
    impl GroupRepository for BarrierRepo {
        async fn list_groups(&self, _auth: &Credentials) -> Result<Vec<Group>, StorageError> {
            self.barrier.wait().await;
            Ok(vec![Group::new(GroupId::new("g1"), "Web")])
        }
    }

    #[async_trait]
    impl SubGroupRepository for BarrierRepo {
        async fn list_sub_groups(
            &self,
            _auth: &Credentials,
        ) -> Result<Vec<SubGroup>, StorageError> {
            self.barrier.wait().await;
            if self.fail_sub_groups {
                return Err(StorageError::Connection("down".into()));
            }
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl TestRepository for BarrierRepo {
        async fn list_tests(&self, _auth: &Credentials) -> Result<Vec<TestCase>, StorageError> {
            self.barrier.wait().await;
            Ok(Vec::new())
        }

        async fn update_test(
            &self,
            _auth: &Credentials,
            _id: &TestId,
            _update: &TestUpdate,
        ) -> Result<(), StorageError> {
            unreachable!("not used by the catalog")
        }

        async fn delete_test(&self, _auth: &Credentials, _id: &TestId) -> Result<(), StorageError> {
            unreachable!("not used by the catalog")
        }

        async fn create_test(
            &self,
            _auth: &Credentials,
            _new: &NewTestCase,
        ) -> Result<TestCase, StorageError> {
            unreachable!("not used by the catalog")
        }
    }

    fn barrier_service(repo: &Arc<BarrierRepo>) -> CatalogService {
        CatalogService::new(
            Arc::new(StaticCredentials::default()),
            repo.clone(),
            repo.clone(),
            repo.clone(),
        )
    }

    #[tokio::test]
    async fn fetches_run_concurrently() {
        let repo = Arc::new(BarrierRepo::new(false));
        let catalog = tokio::time::timeout(Duration::from_secs(1), barrier_service(&repo).load())
            .await
            .expect("fetches were not issued together")
            .unwrap();
        assert_eq!(catalog.groups.len(), 1);
    }

    #[tokio::test]
    async fn one_failed_fetch_fails_the_whole_load() {
        let repo = Arc::new(BarrierRepo::new(true));
        let result = tokio::time::timeout(Duration::from_secs(1), barrier_service(&repo).load())
            .await
            .expect("load did not finish");

        assert!(matches!(
            result,
            Err(CatalogError::Storage(StorageError::Connection(_)))
        ));
    }
}
