//! Login Use Case
//!
//! Checks email + password and issues a signed bearer token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::session_claims::SessionClaims;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_id::UserId,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Login input
#[derive(Debug, Default)]
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed token, valid for `AuthConfig::token_ttl`
    pub token: String,
    pub user_id: UserId,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Unknown email and wrong password both fail with `InvalidCredentials`.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let email = Email::from_optional(input.email.as_deref())
            .ok_or(AuthError::InvalidCredentials)?;
        let raw_password = input
            .password
            .and_then(|p| RawPassword::new(p).ok())
            .ok_or(AuthError::InvalidCredentials)?;

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            UserPassword::verify_absent(raw_password, self.config.pepper_owned()).await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password_hash.is_well_formed() {
            tracing::error!(user_id = %user.user_id, "Stored password hash is malformed");
            return Err(AuthError::InvalidCredentials);
        }

        let password_valid = user
            .password_hash
            .verify(raw_password, self.config.pepper_owned())
            .await?;
        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let claims = SessionClaims {
            user_id: user.user_id,
            email: user.email.unwrap_or(email).into_db(),
            role: user.role,
        };
        let token = platform::token::issue(&claims, &self.config.token_secret, self.config.token_ttl)
            .map_err(AuthError::TokenIssue)?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User logged in");

        Ok(LoginOutput {
            token,
            user_id: user.user_id,
        })
    }
}
