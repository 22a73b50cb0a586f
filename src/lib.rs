//! # Pordisto (Kratos Session Gate)
//!
//! `pordisto` is a small web front-end that owns no identities: authentication
//! lives entirely in an external [Ory Kratos](https://www.ory.sh/kratos)
//! instance. The gate verifies browser sessions against Kratos, caches the
//! result in a signed local cookie, and redirects everyone else to the hosted
//! login page.
//!
//! ## Verification Model
//!
//! - **Single source of truth:** every gated request is verified against
//!   `GET /sessions/whoami` on the Kratos public API, forwarding the caller's
//!   cookies verbatim. The local cookie is a cache of the last successful
//!   verification, never an alternative authority.
//! - **Fail closed:** any verification failure (transport error, timeout,
//!   non-200, malformed payload) reads as "not authenticated" and ends in a
//!   redirect to the login page. Gated handlers never observe an
//!   unauthenticated request.
//! - **Tamper-evident cache:** the local session travels in an HMAC-signed
//!   cookie. A cookie that fails its MAC is treated as absent.
//!
//! Registration is disabled at this surface; identities are provisioned out
//! of band and `/register` always refuses.

pub mod api;
pub mod cli;
pub mod gate;
pub mod pages;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
