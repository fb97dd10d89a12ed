//! Authenticate Use Case
//!
//! Turns a bearer token into verified session claims. Stateless: nothing is
//! looked up in the store.

use std::sync::Arc;

use platform::token::VerifiedToken;

use crate::application::config::AuthConfig;
use crate::domain::entity::session_claims::{AuthenticatedSession, SessionClaims};
use crate::error::{AuthError, AuthResult};

/// Authenticate use case
#[derive(Clone)]
pub struct AuthenticateUseCase {
    config: Arc<AuthConfig>,
}

impl AuthenticateUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    /// `None` means no token was presented (401); a token that fails
    /// verification is `InvalidToken` (403).
    pub fn execute(&self, token: Option<&str>) -> AuthResult<AuthenticatedSession> {
        let token = token.ok_or(AuthError::MissingToken)?;

        let VerifiedToken {
            claims,
            issued_at,
            expires_at,
        } = platform::token::verify::<SessionClaims>(token, &self.config.token_secret)
            .map_err(AuthError::InvalidToken)?;

        Ok(AuthenticatedSession {
            claims,
            iat: issued_at,
            exp: expires_at,
        })
    }
}
