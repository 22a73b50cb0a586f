use crate::cli::actions::{Action, server};
use anyhow::Result;

/// Dispatch the action to its implementation.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Server(args) => server::execute(args).await,
    }
}
