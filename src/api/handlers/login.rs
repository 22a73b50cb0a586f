//! Login entry point.
//!
//! The gate has no login form of its own. This route exists so the
//! application has a stable `/login` URL while the actual flow lives on the
//! provider's hosted UI.

use crate::gate::SessionGate;
use axum::{extract::Extension, response::Redirect};
use std::sync::Arc;

/// Redirect the caller to the hosted login page.
pub async fn login(gate: Extension<Arc<SessionGate>>) -> Redirect {
    Redirect::temporary(gate.login_url())
}
