use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Steam rejected the OpenID assertion or the callback was malformed.
    ///
    /// Covers a wrong `openid.mode`, a `return_to` that does not point at this server, and
    /// a `check_authentication` answer other than `is_valid:true`. Results in a 400 Bad
    /// Request response.
    #[error("Steam OpenID verification failed: {0}")]
    OpenIdVerificationFailed(String),

    /// The identity stored in the session is not a Steam OpenID claimed id.
    ///
    /// Results in a 400 Bad Request response.
    #[error("Invalid Steam identity: {0}")]
    InvalidIdentity(String),

    /// No API key header was sent to an API key protected endpoint.
    #[error("Missing API key")]
    MissingApiKey,

    /// The API key header did not match the configured key.
    #[error("Invalid API key")]
    InvalidApiKey,
}

/// Converts authentication errors into HTTP responses.
///
/// - `OpenIdVerificationFailed` / `InvalidIdentity` → 400 Bad Request with "There was an issue logging you in"
/// - `MissingApiKey` / `InvalidApiKey` → 401 Unauthorized
///
/// Details are logged at debug level; client-facing messages stay generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::OpenIdVerificationFailed(_) | Self::InvalidIdentity(_) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorDto {
                    error: "There was an issue logging you in, please try again.".to_string(),
                }),
            )
                .into_response(),
            Self::MissingApiKey | Self::InvalidApiKey => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "A valid API key is required".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
