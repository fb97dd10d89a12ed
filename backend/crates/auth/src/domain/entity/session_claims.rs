//! Session Claims
//!
//! Payload carried inside a bearer token. Never persisted.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::{user_id::UserId, user_role::UserRole};

/// Claims signed at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "id")]
    pub user_id: UserId,
    pub email: String,
    pub role: UserRole,
}

/// Claims of a verified token, plus its timestamps (unix seconds).
///
/// Inserted into request extensions by the bearer-token middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedSession {
    #[serde(flatten)]
    pub claims: SessionClaims,
    pub iat: i64,
    pub exp: i64,
}
