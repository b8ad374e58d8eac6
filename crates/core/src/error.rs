use thiserror::Error;

use crate::model::{NewTestCaseError, ParseIdError, TestResultError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidId(#[from] ParseIdError),
    #[error(transparent)]
    InvalidResult(#[from] TestResultError),
    #[error(transparent)]
    InvalidNewTest(#[from] NewTestCaseError),
}
