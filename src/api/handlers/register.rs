//! Registration stub.
//!
//! Identities are provisioned out of band; self-service registration is
//! disabled at this surface and the handler refuses unconditionally. It
//! intentionally sits outside the gate so that probing it neither verifies a
//! session nor sets a cookie.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/register",
    responses(
        (status = 403, description = "Self-service registration is disabled")
    ),
    tag = "gate",
)]
/// Refuse self-service registration.
pub async fn register() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "Registration is disabled. Please contact administrator."
        })),
    )
}
