use async_trait::async_trait;
use testdesk_core::model::{Group, SubGroup};

use super::HttpRepository;
use super::mapping::{GroupRecord, SubGroupRecord};
use crate::credentials::Credentials;
use crate::repository::{GroupRepository, StorageError, SubGroupRepository};

#[async_trait]
impl GroupRepository for HttpRepository {
    async fn list_groups(&self, auth: &Credentials) -> Result<Vec<Group>, StorageError> {
        let records: Vec<GroupRecord> = self.fetch("grupos", auth).await?;
        records.into_iter().map(GroupRecord::into_group).collect()
    }
}

#[async_trait]
impl SubGroupRepository for HttpRepository {
    async fn list_sub_groups(&self, auth: &Credentials) -> Result<Vec<SubGroup>, StorageError> {
        let records: Vec<SubGroupRecord> = self.fetch("subgrupos", auth).await?;
        records
            .into_iter()
            .map(SubGroupRecord::into_sub_group)
            .collect()
    }
}
