//! Logout endpoint.
//!
//! Clears the local session cookie and sends the caller to the hosted login
//! page. The provider's own session is not revoked here; a browser holding a
//! still-valid Kratos cookie will simply verify again on its next visit.

use crate::{gate::SessionGate, session::SessionStore};
use axum::{
    extract::Extension,
    http::{HeaderMap, header::SET_COOKIE},
    response::{IntoResponse, Redirect},
};
use std::sync::Arc;
use tracing::{error, info};

/// Expire the local session cookie and redirect to the login page.
pub async fn logout(
    headers: HeaderMap,
    gate: Extension<Arc<SessionGate>>,
    store: Extension<Arc<SessionStore>>,
) -> impl IntoResponse {
    if let Some(session) = store.get(&headers) {
        info!("Clearing local session for {}", session.user_email);
    }

    // Always clear the cookie, even when no valid session was presented.
    let mut response_headers = HeaderMap::new();
    match store.clear() {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => error!("Failed to build expiring session cookie: {err}"),
    }

    (response_headers, Redirect::temporary(gate.login_url()))
}
