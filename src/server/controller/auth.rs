use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use tower_sessions::Session;

use crate::server::{
    error::AppError, middleware::session::AuthSession, service::auth::SteamOpenIdService,
    state::AppState,
};

/// Redirects the user to Steam to sign in.
pub async fn signin(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let auth_service =
        SteamOpenIdService::new(&state.http_client, &state.steam_openid_url, &state.app_url);

    let url = auth_service.login_url()?;

    Ok(Redirect::temporary(url.as_str()))
}

/// Handles the OpenID assertion Steam sends the user back with.
///
/// The assertion is confirmed with Steam before the identity is stored in the session. The
/// player itself is registered by the enrichment middleware on the next request.
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service =
        SteamOpenIdService::new(&state.http_client, &state.steam_openid_url, &state.app_url);

    let identity = auth_service.verify(&params).await?;

    tracing::debug!("Steam sign-in verified for {}", identity);

    AuthSession::new(&session).set_identity(identity).await?;

    Ok(Redirect::to("/"))
}

pub async fn signout(session: Session) -> Result<impl IntoResponse, AppError> {
    AuthSession::new(&session).clear().await;

    Ok(Redirect::to("/"))
}
