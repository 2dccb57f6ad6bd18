//! Session-scoped access-token slot

use std::fmt;
use std::sync::RwLock;

/// An opaque bearer token. Expiry is not tracked; a stale token surfaces as
/// an upstream 401 on the next resource call.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw bearer string, for the Authorization header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

// Keep the raw token out of logs and error chains.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Holds at most one access token for the session.
///
/// Presence or absence is its only state. The lock matters because axum may
/// schedule the callback handler and a resource call concurrently.
#[derive(Debug, Default)]
pub struct TokenStore {
    slot: RwLock<Option<AccessToken>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: AccessToken) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(token);
        }
    }

    pub fn get(&self) -> Option<AccessToken> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }

    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }

    pub fn is_present(&self) -> bool {
        self.slot.read().map(|slot| slot.is_some()).unwrap_or(false)
    }
}
