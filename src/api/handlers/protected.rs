//! Gated JSON endpoint.
//!
//! Smoke endpoint for API consumers: proves the gate end to end and echoes
//! the verified identity back as JSON.

use crate::session::Session;
use axum::{
    extract::Extension,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct Protected {
    status: String,
    message: String,
    user_data: UserData,
    timestamp: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserData {
    email: String,
    name: String,
    user_id: String,
    authenticated: bool,
}

#[utoipa::path(
    get,
    path = "/protected",
    responses(
        (status = 200, description = "Caller holds a verified session", body = Protected),
        (status = 307, description = "No verified session, redirected to the hosted login page")
    ),
    tag = "gate",
)]
/// Echo the verified identity with an RFC 3339 timestamp.
pub async fn protected(session: Extension<Session>) -> impl IntoResponse {
    let Session {
        authenticated,
        user_email,
        user_id,
        user_name,
    } = session.0;

    Json(Protected {
        status: "success".to_string(),
        message: "Authentication successful! This is a protected endpoint.".to_string(),
        user_data: UserData {
            email: user_email,
            name: user_name,
            user_id,
            authenticated,
        },
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::protected;
    use crate::session::Session;
    use anyhow::Result;
    use axum::{body::to_bytes, extract::Extension, http::StatusCode, response::IntoResponse};
    use chrono::DateTime;

    #[tokio::test]
    async fn protected_echoes_the_verified_identity() -> Result<()> {
        let session = Session {
            authenticated: true,
            user_email: "user1@example.com".to_string(),
            user_id: "usr_1".to_string(),
            user_name: "User One".to_string(),
        };

        let response = protected(Extension(session)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let json: serde_json::Value = serde_json::from_slice(&body)?;

        assert_eq!(json["status"], "success");
        assert_eq!(
            json["message"],
            "Authentication successful! This is a protected endpoint."
        );
        assert_eq!(json["user_data"]["email"], "user1@example.com");
        assert_eq!(json["user_data"]["name"], "User One");
        assert_eq!(json["user_data"]["user_id"], "usr_1");
        assert_eq!(json["user_data"]["authenticated"], true);

        let timestamp = json["timestamp"].as_str().unwrap_or_default();
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
        Ok(())
    }
}
