use chrono::{DateTime, Utc};

use crate::model::ids::{GroupId, SessionId, SubGroupId, TestId, UserId};
use crate::model::test_case::TestCase;

/// Request to start a test session.
///
/// Built transiently from the current screen selection; the remote service
/// owns the session from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub group_id: Option<GroupId>,
    pub sub_group_id: Option<SubGroupId>,
    pub technician: Option<UserId>,
    pub tests: Vec<TestCase>,
}

impl NewSession {
    #[must_use]
    pub fn new(
        group_id: Option<GroupId>,
        sub_group_id: Option<SubGroupId>,
        technician: Option<UserId>,
        tests: Vec<TestCase>,
    ) -> Self {
        Self {
            group_id,
            sub_group_id,
            technician,
            tests,
        }
    }

    #[must_use]
    pub fn test_count(&self) -> usize {
        self.tests.len()
    }
}

/// A session as reported back by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub group_id: Option<GroupId>,
    pub sub_group_id: Option<SubGroupId>,
    pub technician: Option<UserId>,
    pub test_ids: Vec<TestId>,
    pub created_at: Option<DateTime<Utc>>,
}
