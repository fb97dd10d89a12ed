//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases (register, login, authenticate)
//! - `infra/` - PostgreSQL and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, router, bearer-token middleware
//!
//! ## Features
//! - Registration with an Admin or Graduate profile
//! - Email + password login issuing an HS256 bearer token (1 hour)
//! - `GET /profile` guarded by the bearer token (401 without, 403 if invalid)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Stateless tokens: nothing stored server-side, no revocation
//! - Unknown email and wrong password are indistinguishable to the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult, ValidationError};
pub use infra::{memory::InMemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
