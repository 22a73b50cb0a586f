use clap::{Arg, Command};

pub const ARG_SESSION_SECRET: &str = "session-secret";
pub const ARG_SESSION_TTL_SECONDS: &str = "session-ttl-seconds";
pub const ARG_HOME_TEXT: &str = "home-text";

pub const DEFAULT_SESSION_SECRET: &str = "dev-secret";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_SESSION_SECRET)
                .long("session-secret")
                .help("Secret used to sign the local session cookie")
                .env("PORDISTO_SESSION_SECRET")
                .default_value(DEFAULT_SESSION_SECRET),
        )
        .arg(
            Arg::new(ARG_SESSION_TTL_SECONDS)
                .long("session-ttl-seconds")
                .help("Session cookie TTL in seconds")
                .env("PORDISTO_SESSION_TTL_SECONDS")
                .default_value("43200")
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(ARG_HOME_TEXT)
                .long("home-text")
                .help("Welcome text rendered on the home page")
                .env("PORDISTO_HOME_TEXT")
                .default_value("Welcome to the application!"),
        )
}
