use axum::http::{HeaderMap, HeaderValue};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::{ApiKeyGuard, API_KEY_HEADER},
};

fn headers_with_key(key: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, HeaderValue::from_static(key));
    headers
}

/// Expected: Ok(()) when the header matches the configured key
#[test]
fn grants_access_with_matching_key() {
    let headers = headers_with_key("secret");

    assert!(ApiKeyGuard::new("secret", &headers).require().is_ok());
}

/// Tests that the header name is matched case-insensitively, as clients send `X-API-KEY`.
#[test]
fn accepts_uppercase_header_name() {
    let mut headers = HeaderMap::new();
    headers.insert("X-API-KEY", HeaderValue::from_static("secret"));

    assert!(ApiKeyGuard::new("secret", &headers).require().is_ok());
}

/// Expected: Err(AuthError::MissingApiKey)
#[test]
fn denies_access_without_header() {
    let headers = HeaderMap::new();

    let result = ApiKeyGuard::new("secret", &headers).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::MissingApiKey))
    ));
}

/// Expected: Err(AuthError::InvalidApiKey)
#[test]
fn denies_access_with_wrong_key() {
    let headers = headers_with_key("guess");

    let result = ApiKeyGuard::new("secret", &headers).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidApiKey))
    ));
}

/// Tests that an unset server key never matches, not even an empty header.
///
/// Expected: Err(AuthError::InvalidApiKey)
#[test]
fn denies_access_when_no_key_configured() {
    let headers = headers_with_key("");

    let result = ApiKeyGuard::new("", &headers).require();

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidApiKey))
    ));
}
