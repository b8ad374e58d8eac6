//! Where request credentials come from.
//!
//! Credentials are resolved on every call, never cached, so a token that is
//! rotated on disk or in the environment is picked up by the next request.

use std::path::PathBuf;

use storage::Credentials;

pub const TOKEN_ENV_VAR: &str = "TESTDESK_TOKEN";

/// Supplies the credentials for the next outbound call.
pub trait CredentialSource: Send + Sync {
    fn credentials(&self) -> Credentials;
}

/// Fixed credentials, mostly for tests and scripted use.
#[derive(Clone, Debug, Default)]
pub struct StaticCredentials(Credentials);

impl StaticCredentials {
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self(credentials)
    }

    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        Self(Credentials::bearer(token))
    }
}

impl CredentialSource for StaticCredentials {
    fn credentials(&self) -> Credentials {
        self.0.clone()
    }
}

/// Reads the bearer token from a file on every call.
///
/// A missing or unreadable file yields anonymous credentials; the service
/// then rejects the call as unauthorized.
#[derive(Clone, Debug)]
pub struct TokenFileCredentials {
    path: PathBuf,
}

impl TokenFileCredentials {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialSource for TokenFileCredentials {
    fn credentials(&self) -> Credentials {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Credentials::bearer(raw),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "token file unreadable");
                Credentials::anonymous()
            }
        }
    }
}

/// Reads the bearer token from an environment variable on every call.
#[derive(Clone, Debug)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(TOKEN_ENV_VAR)
    }
}

impl CredentialSource for EnvCredentials {
    fn credentials(&self) -> Credentials {
        std::env::var(&self.var).map_or_else(|_| Credentials::anonymous(), Credentials::bearer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn token_file_is_reread_on_every_call() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "first").unwrap();
        let source = TokenFileCredentials::new(file.path());
        assert_eq!(source.credentials().token(), Some("first"));

        std::fs::write(file.path(), "second\n").unwrap();
        assert_eq!(source.credentials().token(), Some("second"));
    }

    #[test]
    fn missing_token_file_is_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let source = TokenFileCredentials::new(dir.path().join("absent"));
        assert!(source.credentials().is_anonymous());
    }

    #[test]
    fn unset_env_var_is_anonymous() {
        let source = EnvCredentials::new("TESTDESK_TOKEN_FOR_UNSET_TEST");
        assert!(source.credentials().is_anonymous());
    }
}
