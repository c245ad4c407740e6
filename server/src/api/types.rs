//! Shared API types
//!
//! Common error handling and validator functions used across the API surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use validator::ValidationError;

use crate::core::constants::MAX_INSTRUMENT_LENGTH;
use crate::domain::LeaderboardError;

/// Validator function for page parameter
pub fn validate_page(page: u32) -> Result<(), ValidationError> {
    if page < 1 {
        return Err(ValidationError::new("page_min").with_message("Page must be >= 1".into()));
    }
    Ok(())
}

/// Validator function for instrument identifiers
pub fn validate_instrument(instrument: &str) -> Result<(), ValidationError> {
    if instrument.is_empty() || instrument.len() > MAX_INSTRUMENT_LENGTH {
        return Err(ValidationError::new("instrument_length").with_message(
            format!(
                "Instrument must be 1-{} characters",
                MAX_INSTRUMENT_LENGTH
            )
            .into(),
        ));
    }
    if !instrument
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(ValidationError::new("instrument_charset")
            .with_message("Instrument must be lowercase alphanumeric with underscores".into()));
    }
    Ok(())
}

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: String, message: String },
    NotFound { code: String, message: String },
    Unauthorized { code: String, message: String },
    Forbidden { code: String, message: String },
    Conflict { code: String, message: String },
    Storage { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotFound {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unauthorized(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn forbidden(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Forbidden {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<LeaderboardError> for ApiError {
    fn from(e: LeaderboardError) -> Self {
        match e {
            LeaderboardError::MissingCredential => Self::bad_request(
                "AUTH_HEADER_MISSING",
                "Authorization header with Bearer key is required",
            ),
            LeaderboardError::InvalidCredential => {
                Self::unauthorized("AUTH_KEY_INVALID", "Unknown or malformed auth key")
            }
            LeaderboardError::Blacklisted => {
                Self::unauthorized("USER_BLACKLISTED", "User is blacklisted")
            }
            LeaderboardError::Denylisted => {
                Self::forbidden("SONG_DENYLISTED", "Song hash is denylisted")
            }
            LeaderboardError::SongNotFound => Self::not_found("SONG_NOT_FOUND", "Song not found"),
            LeaderboardError::ScoreNotFound => {
                Self::not_found("SCORE_NOT_FOUND", "No score on this leaderboard")
            }
            LeaderboardError::SongExists => Self::conflict("SONG_EXISTS", "Song already exists"),
            LeaderboardError::Storage(e) => {
                tracing::error!(error = %e, "SQLite error");
                Self::Storage {
                    message: "Database operation failed".to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match self {
            Self::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", code, message)
            }
            Self::NotFound { code, message } => (StatusCode::NOT_FOUND, "not_found", code, message),
            Self::Unauthorized { code, message } => {
                (StatusCode::UNAUTHORIZED, "unauthorized", code, message)
            }
            Self::Forbidden { code, message } => {
                (StatusCode::FORBIDDEN, "forbidden", code, message)
            }
            Self::Conflict { code, message } => (StatusCode::CONFLICT, "conflict", code, message),
            // 520 distinguishes storage faults from handler bugs for clients
            Self::Storage { message } => (
                StatusCode::from_u16(520).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                "storage_error",
                "STORAGE".to_string(),
                message,
            ),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "INTERNAL".to_string(),
                message,
            ),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_type,
                "code": code,
                "message": message
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_validate_page() {
        assert!(validate_page(0).is_err());
        assert!(validate_page(1).is_ok());
        assert!(validate_page(1000).is_ok());
    }

    #[test]
    fn test_validate_instrument() {
        assert!(validate_instrument("guitar").is_ok());
        assert!(validate_instrument("pro_drums").is_ok());
        assert!(validate_instrument("").is_err());
        assert!(validate_instrument("GUITAR").is_err());
        assert!(validate_instrument(&"x".repeat(MAX_INSTRUMENT_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(LeaderboardError::MissingCredential.into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(LeaderboardError::InvalidCredential.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(LeaderboardError::Blacklisted.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(LeaderboardError::Denylisted.into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(LeaderboardError::SongNotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(LeaderboardError::ScoreNotFound.into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(LeaderboardError::SongExists.into()),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_storage_error_uses_520() {
        let err = ApiError::Storage {
            message: "Database operation failed".to_string(),
        };
        assert_eq!(err.into_response().status().as_u16(), 520);
    }
}
