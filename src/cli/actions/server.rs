use crate::api::{self, handlers::auth::AuthConfig};
use anyhow::{Context, Result};
use secrecy::SecretString;
use tracing::debug;
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub token_secret: SecretString,
    pub token_ttl_seconds: i64,
    pub token_issuer: String,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the DSN is invalid or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let dsn = Url::parse(&args.dsn).context("Invalid database connection string")?;

    // Credentials stay out of the logs.
    let mut redacted = dsn.clone();
    if redacted.password().is_some() {
        let _ = redacted.set_password(Some("****"));
    }
    debug!("Connecting to database: {redacted}");

    let auth_config = AuthConfig::new()
        .with_token_ttl_seconds(args.token_ttl_seconds)
        .with_token_issuer(args.token_issuer);

    api::new(args.port, dsn.to_string(), &args.token_secret, auth_config).await
}
