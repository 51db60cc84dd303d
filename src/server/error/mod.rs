//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error returned by every handler, service and startup step.
//! It wraps domain-specific errors (sign-in, configuration) together with the errors of
//! the libraries the server talks through: SeaORM and SQLx for the player store,
//! tower-sessions for the session store, reqwest for Steam and geolocation calls and
//! Serenity for Discord announcements. Because `AppError` implements `IntoResponse`,
//! handlers return `Result<impl IntoResponse, AppError>` and use `?` on any of them.
//!
//! Client-facing bodies are always an `ErrorDto`. Errors caused by the request (unknown
//! player, malformed input, failed sign-in) carry their message to the client. Every
//! other error is logged server-side and answered with a generic message so that store
//! or upstream details never leak.

pub mod auth;
pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError},
};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic conversion, so `?` lifts library errors into
/// `AppError` without explicit mapping. `AuthError` maps its own status codes. `NotFound`
/// and `BadRequest` map to 404 and 400, every other variant maps to 500 Internal Server
/// Error with the details logged.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    ///
    /// Normally aborts startup before the server binds. If it ever reaches a handler it
    /// results in 500 Internal Server Error with the error details logged server-side.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Covers the Steam OpenID handshake, identity parsing and the API key guard.
    /// Delegates to `AuthError::into_response()` for status code mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Database operation error from SeaORM.
    ///
    /// Raised by the player repository and migrations. Results in 500 Internal Server
    /// Error with error details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// SQLx driver error, raised by the session store migration.
    ///
    /// Only seen during startup. Results in 500 Internal Server Error if returned from a
    /// request.
    #[error(transparent)]
    SqlxErr(#[from] sea_orm::SqlxError),

    /// Session store operation error.
    ///
    /// Raised when reading or writing `auth:identity` and `auth:claims`. Results in 500
    /// Internal Server Error with error details logged server-side.
    #[error(transparent)]
    SessionErr(#[from] tower_sessions::session::Error),

    /// HTTP client request error from reqwest.
    ///
    /// Raised by the Steam, geolocation and avatar downloads, including non-success
    /// statuses surfaced through `error_for_status`. Results in 500 Internal Server Error
    /// with error details logged server-side.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Raised when the new-player announcement cannot be delivered. Announcements run
    /// detached from the request, so this is normally only logged.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Socket error while binding or serving.
    ///
    /// Only seen during startup and shutdown.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    ///
    /// # Fields
    /// - `0` - Message returned to the client, e.g. which player or avatar was missing
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    ///
    /// # Fields
    /// - `0` - Message returned to the client describing the invalid input
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error with custom message.
    ///
    /// Results in 500 Internal Server Error. The message is logged, the client receives
    /// a generic one.
    ///
    /// # Fields
    /// - `0` - Message logged server-side, e.g. a rejected avatar download
    #[error("{0}")]
    InternalError(String),
}

/// Converts a Serenity error into `AppError::DiscordErr`.
///
/// Lets `?` be used directly on Serenity calls despite the boxed variant.
///
/// # Arguments
/// - `err` - The Serenity error to wrap
///
/// # Returns
/// - `AppError::DiscordErr` holding the boxed error
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

/// Converts application errors into HTTP responses.
///
/// Client errors carry their message in an `ErrorDto`. Server errors are logged with
/// `tracing::error!` and answered with a generic `ErrorDto`.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` variant
/// - 404 Not Found - For `NotFound` variant
/// - 500 Internal Server Error - For all other error types (DbErr, SessionErr, etc.)
/// - Variable - For `AuthErr`, delegated to `AuthError::into_response()`
impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a logged 500 Internal Server Error.
///
/// Used by `AppError` for every variant without a dedicated status, and usable by
/// handlers that need to answer 500 for an error outside `AppError`.
///
/// # Fields
/// - `0` - The error to log
pub struct InternalServerError<E>(pub E);

/// Logs the wrapped error and builds the generic 500 response.
///
/// # Returns
/// - 500 Internal Server Error with `{"error": "Internal server error"}` as body
impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
