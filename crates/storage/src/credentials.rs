use std::fmt;

/// Credentials attached to a single remote call.
///
/// Passed explicitly into every repository method instead of being read from
/// ambient state inside the transport.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    token: Option<String>,
}

impl Credentials {
    /// Bearer credentials. A blank token is treated as no token at all.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            return Self::anonymous();
        }
        Self {
            token: Some(token.to_owned()),
        }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.token.is_none()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_some() { "<redacted>" } else { "<none>" };
        f.debug_struct("Credentials").field("token", &token).finish()
    }
}
