#![forbid(unsafe_code)]

pub mod credentials;
pub mod http;
pub mod repository;

pub use credentials::Credentials;
pub use http::{ApiConfig, ApiConfigError, HttpInitError, HttpRepository};
pub use repository::{InMemoryRepository, Storage, StorageError};
