//! Bearer credential supply.

use std::fmt;

/// Supplies the bearer credential attached to every request.
///
/// Lifecycle (refresh, expiry) belongs to the provider. `None` sends the
/// request without an `Authorization` header.
pub trait AuthProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// A fixed credential, typically read once from the environment.
#[derive(Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// No credential.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Read the credential from an environment variable; blank counts as absent.
    #[must_use]
    pub fn from_env(var: &str) -> Self {
        Self(
            std::env::var(var)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        )
    }

    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl AuthProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

// Never print the credential itself.
impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.0.is_some() { "<redacted>" } else { "<none>" };
        f.debug_tuple("StaticToken").field(&shown).finish()
    }
}
