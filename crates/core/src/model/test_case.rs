use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{GroupId, SubGroupId, TestId};

//
// ─── RESULT ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TestResultError {
    #[error("test result label cannot be empty")]
    Empty,
}

/// Outcome recorded for a test case.
///
/// The known labels are the ones the remote service stores and expects back.
/// Any other label is kept verbatim in `Other` and sent back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TestResult {
    #[default]
    NotTested,
    Passed,
    Failed,
    Blocked,
    Other(String),
}

impl TestResult {
    /// The results offered for selection.
    pub const ALL: [TestResult; 4] = [
        TestResult::NotTested,
        TestResult::Passed,
        TestResult::Failed,
        TestResult::Blocked,
    ];

    /// Wire label for this result.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            TestResult::NotTested => "Não Testado",
            TestResult::Passed => "Aprovado",
            TestResult::Failed => "Reprovado",
            TestResult::Blocked => "Bloqueado",
            TestResult::Other(label) => label.as_str(),
        }
    }

    /// True for labels outside the known set.
    #[must_use]
    pub fn is_other(&self) -> bool {
        matches!(self, TestResult::Other(_))
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TestResult {
    type Err = TestResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TestResultError::Empty);
        }
        Ok(TestResult::ALL
            .into_iter()
            .find(|result| result.label() == trimmed)
            .unwrap_or_else(|| TestResult::Other(trimmed.to_owned())))
    }
}

impl TryFrom<String> for TestResult {
    type Error = TestResultError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TestResult> for String {
    fn from(value: TestResult) -> Self {
        match value {
            TestResult::Other(label) => label,
            known => known.label().to_owned(),
        }
    }
}

//
// ─── TEST CASE ─────────────────────────────────────────────────────────────────
//

/// A single test-case record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    id: TestId,
    group_id: GroupId,
    sub_group_id: SubGroupId,
    use_case: String,
    description: Option<String>,
    result: TestResult,
    observation: String,
}

impl TestCase {
    #[must_use]
    pub fn new(
        id: TestId,
        group_id: GroupId,
        sub_group_id: SubGroupId,
        use_case: impl Into<String>,
    ) -> Self {
        Self {
            id,
            group_id,
            sub_group_id,
            use_case: use_case.into(),
            description: None,
            result: TestResult::NotTested,
            observation: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Returns a copy carrying `result`; every other field is preserved.
    #[must_use]
    pub fn with_result(mut self, result: TestResult) -> Self {
        self.result = result;
        self
    }

    /// Returns a copy carrying `observation`; every other field is preserved.
    #[must_use]
    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = observation.into();
        self
    }

    /// Returns a copy back in the untested state with no observation.
    #[must_use]
    pub fn reset(self) -> Self {
        self.with_result(TestResult::NotTested)
            .with_observation(String::new())
    }

    #[must_use]
    pub fn id(&self) -> &TestId {
        &self.id
    }

    #[must_use]
    pub fn group_id(&self) -> &GroupId {
        &self.group_id
    }

    #[must_use]
    pub fn sub_group_id(&self) -> &SubGroupId {
        &self.sub_group_id
    }

    #[must_use]
    pub fn use_case(&self) -> &str {
        &self.use_case
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn result(&self) -> &TestResult {
        &self.result
    }

    #[must_use]
    pub fn observation(&self) -> &str {
        &self.observation
    }

    /// Builds the body that persists this test's editable fields.
    #[must_use]
    pub fn to_update(&self) -> TestUpdate {
        TestUpdate::new(self.result.clone(), Some(self.observation.clone()))
    }
}

/// Editable fields sent when a test is saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestUpdate {
    pub result: TestResult,
    pub observation: Option<String>,
}

impl TestUpdate {
    #[must_use]
    pub fn new(result: TestResult, observation: Option<String>) -> Self {
        Self {
            result,
            observation,
        }
    }
}

/// Body of a test-case creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTestCase {
    pub group_id: GroupId,
    pub sub_group_id: SubGroupId,
    pub use_case: String,
    pub description: Option<String>,
}

impl NewTestCase {
    /// Validates and builds a creation request.
    ///
    /// # Errors
    ///
    /// Returns `NewTestCaseError::EmptyUseCase` if `use_case` is blank.
    pub fn new(
        group_id: GroupId,
        sub_group_id: SubGroupId,
        use_case: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, NewTestCaseError> {
        let use_case = use_case.into().trim().to_owned();
        if use_case.is_empty() {
            return Err(NewTestCaseError::EmptyUseCase);
        }
        let description = description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());
        Ok(Self {
            group_id,
            sub_group_id,
            use_case,
            description,
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NewTestCaseError {
    #[error("use case cannot be empty")]
    EmptyUseCase,
}
