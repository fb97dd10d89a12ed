//! Auth Middleware
//!
//! Bearer-token guard for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;

use crate::application::AuthenticateUseCase;
use crate::error::AuthError;

/// Middleware that requires a valid bearer token.
///
/// - no token: 401
/// - token that fails verification: 403
///
/// On success the [`AuthenticatedSession`](crate::domain::AuthenticatedSession)
/// is inserted into the request extensions.
pub async fn require_bearer_token(
    State(authenticate): State<AuthenticateUseCase>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(req.headers());
    let session = authenticate.execute(token.as_deref())?;

    tracing::debug!(user_id = %session.claims.user_id, "Bearer token accepted");

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
