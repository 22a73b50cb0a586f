//! Command-line argument dispatch and server initialization.
//!
//! This module parses validated CLI arguments and maps them to the
//! appropriate action, such as starting the gate with its full configuration.

use crate::cli::actions::{Action, server::Args};
use crate::cli::commands::{kratos, session};
use anyhow::{Context, Result};
use secrecy::SecretString;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let kratos_public_url = matches
        .get_one::<String>(kratos::ARG_KRATOS_PUBLIC_URL)
        .cloned()
        .context("missing required argument: --kratos-public-url")?;

    let kratos_ui_url = matches
        .get_one::<String>(kratos::ARG_KRATOS_UI_URL)
        .cloned()
        .context("missing required argument: --kratos-ui-url")?;

    let session_secret = matches
        .get_one::<String>(session::ARG_SESSION_SECRET)
        .cloned()
        .context("missing required argument: --session-secret")?;

    let session_ttl_seconds = matches
        .get_one::<i64>(session::ARG_SESSION_TTL_SECONDS)
        .copied()
        .unwrap_or(43200);

    let home_text = matches
        .get_one::<String>(session::ARG_HOME_TEXT)
        .cloned()
        .context("missing required argument: --home-text")?;

    Ok(Action::Server(Args {
        port,
        kratos_public_url,
        kratos_ui_url,
        session_secret: SecretString::from(session_secret),
        session_ttl_seconds,
        home_text,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn with_cleared_env<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        temp_env::with_vars(
            [
                ("PORDISTO_PORT", None::<&str>),
                ("PORDISTO_KRATOS_PUBLIC_URL", None),
                ("PORDISTO_KRATOS_UI_URL", None),
                ("PORDISTO_SESSION_SECRET", None),
                ("PORDISTO_SESSION_TTL_SECONDS", None),
                ("PORDISTO_HOME_TEXT", None),
                ("PORDISTO_LOG_LEVEL", None),
            ],
            f,
        )
    }

    #[test]
    fn defaults_map_to_a_server_action() {
        with_cleared_env(|| {
            let command = crate::cli::commands::new();
            let matches = command.get_matches_from(vec!["pordisto"]);

            let action = handler(&matches).expect("handler should succeed with defaults");
            let Action::Server(args) = action;

            assert_eq!(args.port, 8080);
            assert_eq!(args.kratos_public_url, "http://kratos:4433");
            assert_eq!(args.kratos_ui_url, "http://localhost:4455");
            assert_eq!(args.session_secret.expose_secret(), "dev-secret");
            assert_eq!(args.session_ttl_seconds, 43200);
            assert_eq!(args.home_text, "Welcome to the application!");
        });
    }

    #[test]
    fn flags_override_defaults() {
        with_cleared_env(|| {
            let command = crate::cli::commands::new();
            let matches = command.get_matches_from(vec![
                "pordisto",
                "--port",
                "9000",
                "--kratos-public-url",
                "https://kratos.internal:4433/",
                "--session-secret",
                "sekreto",
                "--session-ttl-seconds",
                "120",
            ]);

            let action = handler(&matches).expect("handler should succeed");
            let Action::Server(args) = action;

            assert_eq!(args.port, 9000);
            assert_eq!(args.kratos_public_url, "https://kratos.internal:4433/");
            assert_eq!(args.session_secret.expose_secret(), "sekreto");
            assert_eq!(args.session_ttl_seconds, 120);
        });
    }
}
