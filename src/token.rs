//! Access token cache
//!
//! [`TokenManager`] holds at most one bearer token and decides when it has to
//! be replaced. The actual OAuth exchange is supplied by the caller as a
//! closure so the cache logic stays free of I/O.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::{PushError, PushResult};

/// Tokens expiring within this many seconds are refreshed before use
pub const REFRESH_MARGIN_SECS: i64 = 300;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock used outside of tests
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A bearer token and the instant it stops being valid
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// True once the token is within [`REFRESH_MARGIN_SECS`] of expiry.
    /// A token expiring exactly at the margin is considered stale.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now + Duration::seconds(REFRESH_MARGIN_SECS)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Body returned by the OAuth token endpoint
///
/// Fields are optional so a malformed body surfaces as an authentication
/// error instead of a JSON error.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

impl TokenResponse {
    /// Turn the response into a cached token, anchored at `now`
    pub fn into_access_token(self, now: DateTime<Utc>) -> PushResult<AccessToken> {
        let value = self
            .access_token
            .filter(|v| !v.is_empty())
            .ok_or_else(|| PushError::authentication("token response has no access_token"))?;
        let expires_in = self
            .expires_in
            .ok_or_else(|| PushError::authentication("token response has no expires_in"))?;
        if expires_in <= 0 {
            return Err(PushError::authentication(format!(
                "token response has non-positive expires_in: {expires_in}"
            )));
        }

        Ok(AccessToken {
            value,
            expires_at: now + Duration::seconds(expires_in),
        })
    }
}

/// Thread-safe holder for the cached access token
pub struct TokenManager {
    clock: Arc<dyn Clock>,
    state: Mutex<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            state: Mutex::new(None),
        }
    }

    /// Return a token valid for at least [`REFRESH_MARGIN_SECS`], calling
    /// `fetch` when the cache is empty or stale
    ///
    /// The lock is held across `fetch`, so concurrent callers trigger a
    /// single refresh.
    pub fn ensure_valid<F>(&self, fetch: F) -> PushResult<String>
    where
        F: FnOnce() -> PushResult<TokenResponse>,
    {
        let mut state = self.lock();
        let now = self.clock.now();

        if let Some(token) = state.as_ref() {
            if !token.needs_refresh(now) {
                return Ok(token.value.clone());
            }
            tracing::debug!(expires_at = %token.expires_at, "Access token close to expiry, refreshing");
        } else {
            tracing::debug!("No cached access token, fetching");
        }

        let token = fetch()?.into_access_token(self.clock.now())?;
        tracing::debug!(expires_at = %token.expires_at, "Cached new access token");

        let value = token.value.clone();
        *state = Some(token);
        Ok(value)
    }

    /// Currently cached token, without refreshing
    pub fn cached(&self) -> Option<AccessToken> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<AccessToken>> {
        // The guarded value is a plain Option, always consistent.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("cached", &self.cached())
            .finish()
    }
}
