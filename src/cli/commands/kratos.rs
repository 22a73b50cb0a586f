use clap::{Arg, Command};

pub const ARG_KRATOS_PUBLIC_URL: &str = "kratos-public-url";
pub const ARG_KRATOS_UI_URL: &str = "kratos-ui-url";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_KRATOS_PUBLIC_URL)
                .long("kratos-public-url")
                .help("Base URL of the Kratos public API, used for session verification")
                .env("PORDISTO_KRATOS_PUBLIC_URL")
                .default_value("http://kratos:4433"),
        )
        .arg(
            Arg::new(ARG_KRATOS_UI_URL)
                .long("kratos-ui-url")
                .help("Base URL of the Kratos self-service UI hosting the login page")
                .env("PORDISTO_KRATOS_UI_URL")
                .default_value("http://localhost:4455"),
        )
}
