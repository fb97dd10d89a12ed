//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::token::SigningSecret;

/// Lifetime of a login token
pub const TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Auth application configuration
///
/// Built once at startup and shared read-only behind an `Arc`.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 key for login tokens
    pub token_secret: SigningSecret,
    /// Token lifetime (1 hour)
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    pub fn new(token_secret: SigningSecret) -> Self {
        Self {
            token_secret,
            token_ttl: TOKEN_TTL,
            password_pepper: None,
        }
    }

    /// Create config with a random token secret.
    ///
    /// Tokens issued under it stop verifying when the process restarts.
    pub fn with_random_secret() -> Self {
        Self::new(SigningSecret::random())
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        self.password_pepper = Some(pepper.into());
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Owned pepper for hashing on the blocking pool
    pub(crate) fn pepper_owned(&self) -> Option<Vec<u8>> {
        self.password_pepper.clone()
    }
}
