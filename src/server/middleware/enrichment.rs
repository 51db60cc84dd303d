//! Per-request session enrichment.

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use tower_sessions::Session;

use crate::server::{
    error::AppError, middleware::session::AuthSession, model::player::PlayerClaims,
    service::enrichment::SessionEnrichmentService, state::AppState,
};

/// Resolves the claims of an authenticated session and registers unknown players.
///
/// Resolved claims are inserted into the request extensions and cached in the session.
/// Enrichment failures are logged and the request continues without claims, so the next
/// request retries.
pub async fn enrich_session(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let remote_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    match resolve_claims(&state, &AuthSession::new(&session), remote_ip).await {
        Ok(Some(claims)) => {
            request.extensions_mut().insert(claims);
        }
        Ok(None) => {}
        Err(e) => tracing::error!("Session enrichment failed: {}", e),
    }

    next.run(request).await
}

/// Runs enrichment for the session's identity and keeps `auth:claims` in step with it.
///
/// # Returns
/// - `Ok(Some(PlayerClaims))` - Player exists, claims cached in the session
/// - `Ok(None)` - Signed out, or no player could be registered; cached claims removed
/// - `Err(AppError)` - Session access or enrichment failed
pub(super) async fn resolve_claims(
    state: &AppState,
    auth_session: &AuthSession<'_>,
    remote_ip: Option<IpAddr>,
) -> Result<Option<PlayerClaims>, AppError> {
    let Some(identity) = auth_session.identity().await? else {
        return Ok(None);
    };

    let service = SessionEnrichmentService::new(
        &state.db,
        state.geolocation.as_ref(),
        state.profiles.as_ref(),
        state.notifier.clone(),
    );

    let claims = service.enrich(&identity, remote_ip).await?;

    match &claims {
        Some(claims) => {
            if auth_session.claims().await?.as_ref() != Some(claims) {
                auth_session.set_claims(claims).await?;
            }
        }
        None => auth_session.remove_claims().await?,
    }

    Ok(claims)
}
