//! Auth state and configuration.

use secrecy::SecretString;

use super::token::TokenSigner;

const DEFAULT_TOKEN_TTL_SECONDS: i64 = 60 * 60;
const DEFAULT_TOKEN_ISSUER: &str = "taskejo";

#[derive(Clone, Debug)]
pub struct AuthConfig {
    token_ttl_seconds: i64,
    token_issuer: String,
}

impl AuthConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            token_issuer: DEFAULT_TOKEN_ISSUER.to_string(),
        }
    }

    #[must_use]
    pub fn with_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_token_issuer(mut self, issuer: String) -> Self {
        self.token_issuer = issuer;
        self
    }

    #[must_use]
    pub fn token_ttl_seconds(&self) -> i64 {
        self.token_ttl_seconds
    }

    #[must_use]
    pub fn token_issuer(&self) -> &str {
        &self.token_issuer
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared, read-only auth state: configuration plus the token signer.
///
/// Built once at startup and handed to handlers behind an `Arc`; nothing in
/// here is mutated after construction.
pub struct AuthState {
    config: AuthConfig,
    signer: TokenSigner,
}

impl AuthState {
    #[must_use]
    pub fn new(secret: &SecretString, config: AuthConfig) -> Self {
        let signer = TokenSigner::new(
            secret,
            config.token_issuer().to_string(),
            config.token_ttl_seconds(),
        );
        Self { config, signer }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub(super) fn signer(&self) -> &TokenSigner {
        &self.signer
    }
}
