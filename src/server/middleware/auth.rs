use axum::http::HeaderMap;

use crate::server::error::{auth::AuthError, AppError};

/// Header trusted API clients send their key in.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Guards endpoints reserved for trusted API clients such as game servers.
pub struct ApiKeyGuard<'a> {
    expected: &'a str,
    headers: &'a HeaderMap,
}

impl<'a> ApiKeyGuard<'a> {
    pub fn new(expected: &'a str, headers: &'a HeaderMap) -> Self {
        Self { expected, headers }
    }

    /// Checks the request's API key header against the configured key.
    ///
    /// # Returns
    /// - `Ok(())` - Key matches
    /// - `Err(AuthError::MissingApiKey)` - Header absent or not valid UTF-8
    /// - `Err(AuthError::InvalidApiKey)` - Header present but wrong
    pub fn require(&self) -> Result<(), AppError> {
        let Some(key) = self
            .headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
        else {
            return Err(AuthError::MissingApiKey.into());
        };

        if self.expected.is_empty() || key != self.expected {
            return Err(AuthError::InvalidApiKey.into());
        }

        Ok(())
    }
}
