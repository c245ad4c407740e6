//! Auth extractors for route handlers

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::api::types::ApiError;
use crate::data::types::UserRow;

/// Authenticated user injected by the auth middleware
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserRow);

/// Extractor giving handlers access to the authenticated user.
///
/// Only valid on routes behind `require_auth`; a missing extension means the
/// route was wired without the middleware and is a server bug.
#[derive(Debug)]
pub struct Auth {
    pub user: UserRow,
}

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::internal("Auth middleware not installed on this route"))?;

        Ok(Self { user })
    }
}
