use async_trait::async_trait;
use reqwest::Method;
use testdesk_core::model::{NewTestCase, TestCase, TestId, TestUpdate};

use super::HttpRepository;
use super::mapping::{NewTestPayload, TestRecord, TestUpdatePayload};
use crate::credentials::Credentials;
use crate::repository::{StorageError, TestRepository};

#[async_trait]
impl TestRepository for HttpRepository {
    async fn list_tests(&self, auth: &Credentials) -> Result<Vec<TestCase>, StorageError> {
        let records: Vec<TestRecord> = self.fetch("testes", auth).await?;
        records.into_iter().map(TestRecord::into_test).collect()
    }

    async fn update_test(
        &self,
        auth: &Credentials,
        id: &TestId,
        update: &TestUpdate,
    ) -> Result<(), StorageError> {
        let url = self.config.resource_url("testes", id.as_str());
        let builder = self
            .request_to(Method::PATCH, url, auth)
            .json(&TestUpdatePayload::from_update(update));
        Self::send(builder).await?;
        Ok(())
    }

    async fn delete_test(&self, auth: &Credentials, id: &TestId) -> Result<(), StorageError> {
        let url = self.config.resource_url("testes", id.as_str());
        Self::send(self.request_to(Method::DELETE, url, auth)).await?;
        Ok(())
    }

    async fn create_test(
        &self,
        auth: &Credentials,
        new: &NewTestCase,
    ) -> Result<TestCase, StorageError> {
        let builder = self
            .request(Method::POST, "testes", auth)
            .json(&NewTestPayload::from_new(new));
        let record: TestRecord = Self::send(builder)
            .await?
            .json()
            .await
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        record.into_test()
    }
}
