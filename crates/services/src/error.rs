//! Shared error types for the services crate.

use thiserror::Error;

use storage::HttpInitError;
use storage::repository::StorageError;
use testdesk_core::model::NewTestCaseError;

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `TestCaseService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TestCaseServiceError {
    #[error(transparent)]
    NewTest(#[from] NewTestCaseError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SessionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Http(#[from] HttpInitError),
}
