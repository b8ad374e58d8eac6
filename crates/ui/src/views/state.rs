use dioxus::prelude::*;
use services::SessionServiceError;
use storage::StorageError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unauthorized,
    Unreachable,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::Unauthorized => "Your session has expired. Sign in again.",
            ViewError::Unreachable => "The test service could not be reached.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }

    #[must_use]
    pub fn from_storage(err: &StorageError) -> Self {
        match err {
            StorageError::Unauthorized => ViewError::Unauthorized,
            StorageError::Connection(_) => ViewError::Unreachable,
            _ => ViewError::Unknown,
        }
    }
}

impl From<SessionServiceError> for ViewError {
    fn from(err: SessionServiceError) -> Self {
        match err {
            SessionServiceError::Storage(inner) => ViewError::from_storage(&inner),
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
