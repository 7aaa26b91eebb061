//! Bearer credential storage and expiry tracking.
//!
//! [`TokenState`] holds the credential obtained from a successful
//! authentication call and answers whether it is still within its advertised
//! lifetime. The expiry check is advisory only: the request executor attaches
//! any present token, valid or not, and lets the server reject stale ones
//! with a 401.

use std::{
    fmt,
    sync::{Arc, RwLock},
    time::{Duration, SystemTime},
};

/// A bearer credential and its lifetime bounds.
///
/// Replaced wholesale on each successful authentication; never mutated in
/// place. `expires_at` is always strictly after `issued_at` for any nonzero
/// ttl.
#[derive(Clone)]
pub struct Credential {
    token: String,
    issued_at: SystemTime,
    expires_at: SystemTime,
}

impl Credential {
    fn new(token: String, ttl: Duration, now: SystemTime) -> Self {
        Self {
            token,
            issued_at: now,
            expires_at: now + ttl,
        }
    }

    /// The opaque bearer token value.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// When the credential was recorded.
    pub fn issued_at(&self) -> SystemTime {
        self.issued_at
    }

    /// When the credential stops being valid.
    pub fn expires_at(&self) -> SystemTime {
        self.expires_at
    }

    /// Returns `true` if the credential is still within its lifetime at the
    /// given instant.
    pub fn is_valid_at(&self, instant: SystemTime) -> bool {
        instant < self.expires_at
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Shared, read-mostly holder for the current bearer credential.
///
/// Cloning is cheap and all clones observe the same credential. Concurrent
/// reads are safe; re-authentication takes the single write path and the last
/// writer wins.
#[derive(Clone, Debug, Default)]
pub struct TokenState {
    inner: Arc<RwLock<Option<Credential>>>,
}

impl TokenState {
    /// Creates an empty token state with no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new credential, replacing any previous one.
    ///
    /// The expiry is computed as `now + ttl_seconds`. The token format is not
    /// validated.
    pub fn set_credential(&self, token: impl Into<String>, ttl_seconds: u64) {
        self.set_credential_at(token, ttl_seconds, SystemTime::now());
    }

    /// Records a new credential with an explicit issue instant.
    ///
    /// Exists so expiry behavior can be exercised deterministically without
    /// waiting out a real ttl.
    pub fn set_credential_at(
        &self,
        token: impl Into<String>,
        ttl_seconds: u64,
        issued_at: SystemTime,
    ) {
        let credential = Credential::new(token.into(), Duration::from_secs(ttl_seconds), issued_at);
        *self.inner.write().expect("token lock poisoned") = Some(credential);
    }

    /// Returns `true` iff a credential exists and the wall clock has not
    /// passed its expiry. No network check is performed.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(SystemTime::now())
    }

    /// Validity check against an arbitrary instant.
    pub fn is_valid_at(&self, instant: SystemTime) -> bool {
        self.inner
            .read()
            .expect("token lock poisoned")
            .as_ref()
            .is_some_and(|c| c.is_valid_at(instant))
    }

    /// Returns the current token regardless of validity.
    ///
    /// Callers decide whether to use it; the executor attaches a present
    /// token even past its expiry and relies on the server's 401 to force
    /// re-authentication.
    pub fn current_token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("token lock poisoned")
            .as_ref()
            .map(|c| c.token.clone())
    }

    /// Drops the credential, leaving the state unauthenticated.
    pub fn clear(&self) {
        *self.inner.write().expect("token lock poisoned") = None;
    }
}
