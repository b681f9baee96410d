//! Session persistence and bearer-token validity checks.
//!
//! The client treats the stored JWT purely as a credential with an
//! embedded expiry: it never verifies signatures (that is the server's
//! job), it only decodes the payload to decide whether the session is
//! still worth presenting. Every decode failure is treated as "not
//! authenticated": the check fails closed and never panics.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::UserProfile;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "authToken";
/// Storage key for the serialized user profile.
pub const PROFILE_KEY: &str = "user";

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Malformed,
    #[error("payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("claims are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ── Platform seams ──────────────────────────────────────────────────

/// Durable key/value storage, synchronous from the caller's view.
/// Backed by LocalStorage in the browser, a HashMap in tests.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Source of "now" in Unix seconds. Injected so expiry checks are
/// deterministic in tests and can use `js_sys::Date` under WASM, where
/// `std::time::SystemTime` is unavailable.
pub trait Clock {
    fn now_unix(&self) -> i64;
}

/// Wall clock backed by `std::time` (native targets).
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

/// In-memory storage backend for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

// ── Claims ──────────────────────────────────────────────────────────

/// Claims the client reads out of the JWT payload. Only `exp` matters
/// for the authentication check; the rest is kept for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration time (Unix seconds). Absent means never valid.
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// Decode the payload segment of a JWT without verifying its signature.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    let claims = serde_json::from_slice(&bytes)?;
    Ok(claims)
}

// ── TokenStore ──────────────────────────────────────────────────────

/// Persists the bearer token and user profile and answers the one
/// question that matters for authorization: is this session still
/// valid right now?
#[derive(Clone)]
pub struct TokenStore {
    storage: Rc<dyn SessionStorage>,
    clock: Rc<dyn Clock>,
}

impl TokenStore {
    pub fn new(storage: Rc<dyn SessionStorage>, clock: Rc<dyn Clock>) -> Self {
        Self { storage, clock }
    }

    /// Write a fresh session, overwriting any prior one. The profile
    /// lands first and the token last: token presence is the commit
    /// point, so no reader can observe a profile-only state as
    /// authenticated.
    pub fn save(&self, token: &str, profile: &UserProfile) {
        match serde_json::to_string(profile) {
            Ok(json) => self.storage.set(PROFILE_KEY, &json),
            Err(e) => log::error!("failed to serialize profile: {e}"),
        }
        self.storage.set(TOKEN_KEY, token);
    }

    /// Remove both token and profile. Idempotent; the token goes first
    /// for the same ordering reason as in [`TokenStore::save`].
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(PROFILE_KEY);
    }

    /// Raw bearer token for `Authorization` headers.
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY)
    }

    /// True only when a stored token decodes as a three-part JWT whose
    /// `exp` lies strictly in the future. Everything else (no token,
    /// wrong structure, undecodable payload, missing expiry) is
    /// "not authenticated".
    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.storage.get(TOKEN_KEY) else {
            return false;
        };
        match decode_claims(&token) {
            Ok(Claims { exp: Some(exp), .. }) => exp > self.clock.now_unix(),
            Ok(_) => {
                log::debug!("token carries no expiry claim, treating as expired");
                false
            }
            Err(e) => {
                log::debug!("token failed to decode: {e}");
                false
            }
        }
    }

    /// Stored profile, verbatim. Display-only: this deliberately does
    /// not consult token validity, so a stale name may render while a
    /// redirect to login is already underway. Authorization decisions
    /// must go through [`TokenStore::is_authenticated`].
    pub fn current_user(&self) -> Option<UserProfile> {
        let json = self.storage.get(PROFILE_KEY)?;
        match serde_json::from_str(&json) {
            Ok(profile) => Some(profile),
            Err(e) => {
                log::warn!("stored profile is not valid JSON: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Clock pinned to a fixed instant so expiry tests are exact.
    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn now_unix(&self) -> i64 {
            self.0
        }
    }

    const NOW: i64 = 1_700_000_000;

    fn store() -> TokenStore {
        TokenStore::new(Rc::new(MemoryStorage::default()), Rc::new(FixedClock(NOW)))
    }

    fn make_token(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{header}.{body}.fake-signature")
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: "usr_1".into(),
            email: "demo@neobank.com".into(),
            first_name: "Demo".into(),
            last_name: "User".into(),
            role: "admin".into(),
            company_name: Some("Neobank".into()),
        }
    }

    #[test]
    fn absent_token_is_unauthenticated() {
        assert!(!store().is_authenticated());
    }

    #[test]
    fn malformed_tokens_fail_closed() {
        let store = store();
        for bad in [
            "not-a-jwt",
            "two.parts",
            "one.too.many.parts",
            "header.!!!not-base64!!!.sig",
            // valid base64url payload, but not JSON
            "header.bm90LWpzb24.sig",
        ] {
            store.save(bad, &profile());
            assert!(!store.is_authenticated(), "token {bad:?} must fail closed");
        }
    }

    #[test]
    fn expiry_is_enforced_strictly() {
        let store = store();

        store.save(&make_token(&json!({ "exp": NOW - 1 })), &profile());
        assert!(!store.is_authenticated());

        store.save(&make_token(&json!({ "exp": NOW })), &profile());
        assert!(!store.is_authenticated(), "exp == now is already expired");

        store.save(&make_token(&json!({ "exp": NOW + 1 })), &profile());
        assert!(store.is_authenticated());
    }

    #[test]
    fn missing_expiry_claim_fails_closed() {
        let store = store();
        store.save(&make_token(&json!({ "sub": "usr_1" })), &profile());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn save_then_clear_round_trip() {
        let store = store();
        store.save(&make_token(&json!({ "exp": NOW + 60 })), &profile());
        assert!(store.token().is_some());
        assert_eq!(store.current_user(), Some(profile()));

        store.clear();
        assert!(store.token().is_none());
        assert!(store.current_user().is_none());
        assert!(!store.is_authenticated());

        // Clearing an already-empty store is a no-op, never an error.
        store.clear();
        assert!(store.token().is_none());
    }

    #[test]
    fn profile_is_readable_with_expired_token() {
        // The documented asymmetry: current_user() is display-only and
        // keeps answering after expiry, while is_authenticated() says no.
        let store = store();
        store.save(&make_token(&json!({ "exp": NOW - 100 })), &profile());
        assert_eq!(store.current_user(), Some(profile()));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn corrupt_stored_profile_reads_as_none() {
        let storage = Rc::new(MemoryStorage::default());
        storage.set(PROFILE_KEY, "{not json");
        let store = TokenStore::new(storage, Rc::new(FixedClock(NOW)));
        assert!(store.current_user().is_none());
    }

    #[test]
    fn decode_claims_reads_standard_fields() {
        let token = make_token(&json!({ "exp": 123, "sub": "usr_9", "iat": 100 }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, Some(123));
        assert_eq!(claims.sub.as_deref(), Some("usr_9"));
        assert_eq!(claims.iat, Some(100));
    }
}
