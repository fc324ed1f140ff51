use anyhow::Result;

use encore_core::credentials::TOKEN_KEY;

use crate::commands::context::App;

/// Stores the bearer token for subsequent commands. The token value is
/// written to the credential file and never echoed or logged.
pub async fn run(app: &App, token: &str) -> Result<()> {
    app.credentials.set(TOKEN_KEY, token).await?;
    println!("✅ Signed in.");
    Ok(())
}
