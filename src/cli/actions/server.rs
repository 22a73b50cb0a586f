use crate::{
    api, cli::commands::session::DEFAULT_SESSION_SECRET, gate::SessionGate, pages::Pages,
    session::SessionStore,
};
use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub kratos_public_url: String,
    pub kratos_ui_url: String,
    pub session_secret: SecretString,
    pub session_ttl_seconds: i64,
    pub home_text: String,
}

/// Start the session gate server.
/// # Errors
/// Returns an error if the provider URLs are invalid or the listener fails to bind.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    if args.session_secret.expose_secret() == DEFAULT_SESSION_SECRET {
        warn!("Using the default session secret, set PORDISTO_SESSION_SECRET in production");
    }

    let gate = SessionGate::new(&args.kratos_public_url, &args.kratos_ui_url)
        .context("Invalid identity provider configuration")?;

    // Cookies are only marked Secure when the browser-facing flow is https.
    let store = SessionStore::new(args.session_secret)
        .with_ttl_seconds(args.session_ttl_seconds)
        .with_secure(cookie_secure(&args.kratos_ui_url));

    let pages = Pages::new(args.home_text);

    api::new(args.port, Arc::new(gate), Arc::new(store), Arc::new(pages)).await
}

fn cookie_secure(kratos_ui_url: &str) -> bool {
    kratos_ui_url.starts_with("https://")
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("kratos_public_url", args.kratos_public_url.clone()),
        ("kratos_ui_url", args.kratos_ui_url.clone()),
        ("session_ttl_seconds", args.session_ttl_seconds.to_string()),
        (
            "session_secret_set",
            (args.session_secret.expose_secret() != DEFAULT_SESSION_SECRET).to_string(),
        ),
        (
            "secure_cookies",
            cookie_secure(&args.kratos_ui_url).to_string(),
        ),
        ("home_text", args.home_text.clone()),
    ];
    log_entries("Startup configuration", &entries);
}

fn log_entries(title: &str, entries: &[(&str, String)]) {
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\n{title}:", pordisto_banner());
    for (key, value) in entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn pordisto_banner() -> String {
    let short_hash = short_commit(crate::GIT_COMMIT_HASH);
    PORDISTO_BANNER.replace(
        "{VERSION}",
        &format!(" - {} - {}", env!("CARGO_PKG_VERSION"), short_hash),
    )
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() > 7 {
        trimmed[..7].to_string()
    } else {
        trimmed.to_string()
    }
}

const PORDISTO_BANNER: &str = r"
  _______
 |  ___  |
 | |   | |
 | |  o| |  P O R D I S T O{VERSION}
 | |   | |
 |_|___|_|";
