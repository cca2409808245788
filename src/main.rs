//! shared_with_me CLI - Print the Google Drive files shared with you.

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use shared_with_me::logging::init_logging;
use shared_with_me::{enumerate, print_listing, Authenticator};

/// List every Google Drive file shared with the authenticated account.
#[derive(Parser)]
#[command(name = "shared_with_me")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to service account JSON credentials file.
    #[arg(long, env = "GOOGLE_APPLICATION_CREDENTIALS")]
    credentials: Option<PathBuf>,

    /// OAuth2 access token to use instead of a service account.
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// An access token wins over a credentials file when both are set.
    fn authenticator(&self) -> Result<Authenticator> {
        if let Some(token) = &self.access_token {
            return Ok(Authenticator::from_access_token(token.clone()));
        }

        match &self.credentials {
            Some(path) => Authenticator::from_file(path)
                .with_context(|| format!("Failed to load credentials from {:?}", path)),
            None => bail!(
                "No credentials configured: set GOOGLE_APPLICATION_CREDENTIALS or GOOGLE_OAUTH_ACCESS_TOKEN"
            ),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    println!("Authenticating to Google Drive...");
    let session = cli
        .authenticator()?
        .authenticate()
        .await
        .context("Could not authenticate to Google Drive")?;

    println!("Fetching shared files...");
    let listing = enumerate(&session).await;

    print_listing(&listing, &mut io::stdout().lock())?;

    Ok(())
}
