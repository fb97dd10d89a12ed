//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{LoginUseCase, RegisterUseCase};
use crate::domain::entity::session_claims::AuthenticatedSession;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult, ValidationError};
use crate::presentation::dto::{LoginRequest, LoginResponse, ProfileResponse, RegisterRequest};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    payload.map(|Json(req)| req).map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected request body");
        AuthError::Validation(ValidationError::InvalidBody)
    })
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let req = body(payload)?;
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    use_case.execute(req.into()).await?;

    Ok((StatusCode::CREATED, "Registered successfully!"))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    // An unreadable body is answered like any other failed login
    let req = body(payload).map_err(|_| AuthError::InvalidCredentials)?;
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case.execute(req.into()).await?;

    Ok(Json(LoginResponse {
        message: "Logged in successfully!",
        token: output.token,
    }))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /profile (behind `require_bearer_token`)
pub async fn profile(Extension(session): Extension<AuthenticatedSession>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Welcome to your profile!",
        user: session,
    })
}
