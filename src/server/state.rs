//! Application state shared across all request handlers.
//!
//! `AppState` is initialized once during startup and cloned into every handler through
//! Axum's state extraction. Every field is cheap to clone: the database connection and the
//! reqwest client are pools, and the external collaborators sit behind `Arc`.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::service::{
    geolocation::GeoLocator, notification::PlayerNotifier, steam::ProfileProvider,
};

/// Application state containing shared resources and dependencies.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for the OpenID verification request.
    ///
    /// Configured without redirects and with a request timeout.
    pub http_client: reqwest::Client,

    /// Caller country lookup.
    pub geolocation: Arc<dyn GeoLocator>,

    /// Steam profile and avatar access.
    pub profiles: Arc<dyn ProfileProvider>,

    /// Announcer for newly registered players.
    pub notifier: Arc<dyn PlayerNotifier>,

    /// Public base URL of this server, without trailing slash.
    ///
    /// Used for the OpenID realm and return address.
    pub app_url: String,

    /// Steam's OpenID 2.0 endpoint.
    pub steam_openid_url: String,

    /// Key trusted API clients send in `X-API-KEY`.
    pub players_api_key: String,
}
