//! Local session record and the signed cookie that carries it.
//!
//! The session is a cache of the last successful identity-provider
//! verification, not an authority of its own. It travels in a single
//! HMAC-signed cookie: `base64url(payload) "." base64url(tag)` where the tag
//! covers the encoded payload. A cookie that fails its MAC, or does not parse,
//! is treated as absent.

use anyhow::{Context, Result};
use axum::http::{HeaderMap, HeaderValue, header::COOKIE};
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

const SESSION_COOKIE_NAME: &str = "pordisto_session";

const DEFAULT_SESSION_TTL_SECONDS: i64 = 12 * 60 * 60;

type HmacSha256 = Hmac<Sha256>;

/// Identity snapshot cached after a successful verification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub authenticated: bool,
    pub user_email: String,
    pub user_id: String,
    pub user_name: String,
}

/// Signs sessions into cookies and reads them back.
#[derive(Debug)]
pub struct SessionStore {
    secret: SecretString,
    ttl_seconds: i64,
    secure: bool,
}

impl SessionStore {
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            secure: false,
        }
    }

    #[must_use]
    pub fn with_ttl_seconds(mut self, seconds: i64) -> Self {
        self.ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Read the session carried by the request cookies, if any.
    ///
    /// Missing, foreign, tampered and malformed cookies all read as `None`.
    #[must_use]
    pub fn get(&self, headers: &HeaderMap) -> Option<Session> {
        let value = extract_session_cookie(headers)?;
        self.open(&value)
    }

    /// Build a `Set-Cookie` value carrying the signed session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be serialized.
    pub fn put(&self, session: &Session) -> Result<HeaderValue> {
        let value = self.seal(session)?;
        let mut cookie = format!(
            "{SESSION_COOKIE_NAME}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.ttl_seconds
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).context("Failed to build session cookie")
    }

    /// Build a `Set-Cookie` value that expires the session cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie is not a valid header value.
    pub fn clear(&self) -> Result<HeaderValue> {
        let mut cookie =
            format!("{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).context("Failed to build expiring session cookie")
    }

    fn seal(&self, session: &Session) -> Result<String> {
        let payload = serde_json::to_vec(session).context("Failed to serialize session")?;
        let payload = Base64UrlUnpadded::encode_string(&payload);
        let mut mac = self.keyed_mac()?;
        mac.update(payload.as_bytes());
        let tag = Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes());
        Ok(format!("{payload}.{tag}"))
    }

    fn open(&self, value: &str) -> Option<Session> {
        let (payload, tag) = value.split_once('.')?;
        let tag = Base64UrlUnpadded::decode_vec(tag).ok()?;
        let mut mac = self.keyed_mac().ok()?;
        mac.update(payload.as_bytes());
        if mac.verify_slice(&tag).is_err() {
            debug!("Session cookie failed MAC verification");
            return None;
        }
        let payload = Base64UrlUnpadded::decode_vec(payload).ok()?;
        serde_json::from_slice(&payload).ok()
    }

    fn keyed_mac(&self) -> Result<HmacSha256> {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .context("Failed to key the session MAC")
    }
}

fn extract_session_cookie(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}
