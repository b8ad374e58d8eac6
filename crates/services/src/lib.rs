#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod catalog_service;
pub mod error;
pub mod session_service;
pub mod test_case_service;

pub use app_services::AppServices;
pub use auth::{CredentialSource, EnvCredentials, StaticCredentials, TokenFileCredentials};
pub use catalog_service::{Catalog, CatalogService};
pub use error::{AppServicesError, CatalogError, SessionServiceError, TestCaseServiceError};
pub use session_service::SessionService;
pub use test_case_service::TestCaseService;
