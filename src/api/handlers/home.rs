//! Gated home page.

use crate::{pages::Pages, session::Session};
use axum::{
    extract::Extension,
    response::{Html, IntoResponse},
};
use std::sync::Arc;
use tracing::debug;

/// Render the home page for a verified caller.
///
/// The [`Session`] extension is installed by the gate; this handler never
/// sees unverified requests.
pub async fn home(
    pages: Extension<Arc<Pages>>,
    session: Extension<Session>,
) -> impl IntoResponse {
    debug!("Rendering home page for {}", session.user_email);
    Html(pages.render_home(&session))
}
