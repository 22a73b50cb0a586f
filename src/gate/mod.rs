//! Session verification against the identity provider.
//!
//! Every gated request is checked against `GET /sessions/whoami` on the
//! Kratos public API. There is no local fallback: a request either carries
//! cookies Kratos accepts, or it is redirected to the hosted login page.

use crate::{
    APP_USER_AGENT,
    session::{Session, SessionStore},
};
use anyhow::{Context, Result};
use axum::{
    Extension,
    extract::Request,
    http::{
        HeaderMap, StatusCode,
        header::{COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use reqwest::Client;
use serde::Deserialize;
use std::{sync::Arc, time::Duration};
use tracing::{Instrument, debug, error, info_span, instrument};
use url::Url;

const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// Verifies browser cookies against the Kratos public API.
#[derive(Debug)]
pub struct SessionGate {
    client: Client,
    whoami_url: String,
    login_url: String,
    verify_timeout: Duration,
}

/// Whoami payload, reduced to the members the gate projects.
///
/// Unknown members are ignored and missing members fall back to defaults, so
/// schema drift on the provider side does not lock users out.
#[derive(Debug, Deserialize)]
struct Whoami {
    #[serde(default)]
    identity: Identity,
}

#[derive(Debug, Default, Deserialize)]
struct Identity {
    id: Option<String>,
    #[serde(default)]
    traits: Traits,
}

#[derive(Debug, Default, Deserialize)]
struct Traits {
    email: Option<String>,
    name: Option<String>,
}

impl SessionGate {
    /// Build a gate from the provider's public and UI base URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if either base URL does not parse.
    pub fn new(kratos_public_url: &str, kratos_ui_url: &str) -> Result<Self> {
        let public_url = Url::parse(kratos_public_url)
            .with_context(|| format!("Invalid Kratos public URL: {kratos_public_url}"))?;
        let ui_url = Url::parse(kratos_ui_url)
            .with_context(|| format!("Invalid Kratos UI URL: {kratos_ui_url}"))?;

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .context("Failed to build identity provider client")?;

        Ok(Self {
            client,
            whoami_url: format!(
                "{}/sessions/whoami",
                public_url.as_str().trim_end_matches('/')
            ),
            login_url: format!("{}/login", ui_url.as_str().trim_end_matches('/')),
            verify_timeout: DEFAULT_VERIFY_TIMEOUT,
        })
    }

    #[must_use]
    pub fn with_verify_timeout(mut self, timeout: Duration) -> Self {
        self.verify_timeout = timeout;
        self
    }

    /// Hosted login page unauthenticated callers are sent to.
    #[must_use]
    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Convenience wrapper that returns true/false instead of the session.
    #[instrument(skip(self, headers))]
    pub async fn verify(&self, headers: &HeaderMap) -> bool {
        self.verify_session(headers).await.is_some()
    }

    /// Verify the caller's cookies against the identity provider.
    ///
    /// Forwards every received `Cookie` header verbatim and projects a
    /// [`Session`] out of a `200` whoami response. Everything else, wire
    /// errors and timeouts included, reads as "no session". One attempt per
    /// request, no retries.
    pub async fn verify_session(&self, headers: &HeaderMap) -> Option<Session> {
        let span = info_span!(
            "session.whoami",
            http.method = "GET",
            url = %self.whoami_url
        );
        async {
            let mut request = self
                .client
                .get(&self.whoami_url)
                .timeout(self.verify_timeout);
            if let Some(cookies) = forwarded_cookies(headers) {
                request = request.header(COOKIE, cookies);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(err) => {
                    error!("Identity provider request failed: {err}");
                    return None;
                }
            };

            let status = response.status();
            if status != StatusCode::OK {
                debug!("Identity provider rejected the session: {status}");
                return None;
            }

            match response.json::<Whoami>().await {
                Ok(whoami) => Some(project_session(whoami)),
                Err(err) => {
                    error!("Invalid identity provider payload: {err}");
                    None
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Guard for gated routes.
///
/// Unverified requests are redirected to the hosted login page and never
/// reach the inner handler. Verified requests carry the [`Session`] in their
/// extensions and leave with a freshly signed session cookie.
pub async fn require_session(
    Extension(gate): Extension<Arc<SessionGate>>,
    Extension(store): Extension<Arc<SessionStore>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(session) = gate.verify_session(request.headers()).await else {
        debug!("No verified session, redirecting to {}", gate.login_url());
        return Redirect::temporary(gate.login_url()).into_response();
    };

    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;

    match store.put(&session) {
        Ok(cookie) => {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build session cookie: {err}"),
    }

    response
}

/// Map the provider's identity onto the local session record.
///
/// Missing members degrade to placeholders rather than failing verification;
/// the display name prefers `traits.name`, then `traits.email`.
fn project_session(whoami: Whoami) -> Session {
    let Identity { id, traits } = whoami.identity;
    let Traits { email, name } = traits;

    Session {
        authenticated: true,
        user_email: email.clone().unwrap_or_else(|| "Unknown".to_string()),
        user_id: id.unwrap_or_else(|| "Unknown".to_string()),
        user_name: name.or(email).unwrap_or_else(|| "User".to_string()),
    }
}

fn forwarded_cookies(headers: &HeaderMap) -> Option<String> {
    let cookies = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    if cookies.is_empty() {
        None
    } else {
        Some(cookies)
    }
}
