//! Authentication middleware

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::extractors::AuthUser;
use crate::api::types::ApiError;
use crate::domain::LeaderboardService;

/// Shared auth state for middleware
#[derive(Clone)]
pub struct AuthState {
    pub service: Arc<LeaderboardService>,
}

/// Authentication middleware
///
/// Resolves the `Authorization: Bearer <key>` header to a user and injects
/// an `AuthUser` into request extensions. Resolves identity only; blacklist
/// policy is applied per operation in the domain layer.
pub async fn require_auth(
    State(state): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let user = state.service.authenticate(authorization).await?;

    tracing::trace!(user_id = user.user_id, "Authenticated request");
    request.extensions_mut().insert(AuthUser(user));

    Ok(next.run(request).await)
}
