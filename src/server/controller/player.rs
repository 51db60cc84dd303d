use std::net::IpAddr;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{api::ErrorDto, player::PlayerDto},
    server::{
        error::AppError,
        middleware::{auth::ApiKeyGuard, session::AuthSession},
        service::player::PlayerService,
        state::AppState,
    },
};

/// Tag for grouping player endpoints in OpenAPI documentation
pub static PLAYER_TAG: &str = "player";

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive fragment of the display name.
    pub q: Option<String>,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InitializeParams {
    /// Address the API client saw the player connect from.
    pub ip: String,
}

/// Get the player of the current session.
///
/// Returns `null` when the session is signed out or its player has not been registered
/// yet.
///
/// # Returns
/// - `200 OK` - The current player or `null`
/// - `400 Bad Request` - Session holds an identity that is not a Steam id
/// - `500 Internal Server Error` - Session or database error
#[utoipa::path(
    get,
    path = "/api/players",
    tag = PLAYER_TAG,
    responses(
        (status = 200, description = "Current player, null when signed out", body = Option<PlayerDto>),
        (status = 400, description = "Session identity is not a Steam id", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_current_player(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let player_id = AuthSession::new(&session).player_id().await?;

    let service = PlayerService::new(&state.db, state.geolocation.as_ref());

    let player = service.get_current(player_id.as_deref()).await?;

    Ok(Json(player.map(|player| player.into_dto())))
}

/// Get a player's avatar image.
///
/// # Arguments
/// - `player_id` - SteamID64 of the player
///
/// # Returns
/// - `200 OK` - Avatar bytes
/// - `404 Not Found` - Unknown player or no stored avatar
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/players/avatar/{player_id}",
    tag = PLAYER_TAG,
    params(
        ("player_id" = String, Path, description = "SteamID64 of the player")
    ),
    responses(
        (status = 200, description = "Avatar image", content_type = "image/jpg", body = Vec<u8>),
        (status = 404, description = "Player or avatar not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_player_avatar(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let service = PlayerService::new(&state.db, state.geolocation.as_ref());

    let avatar = service.get_avatar(&player_id).await?;

    Ok(([(header::CONTENT_TYPE, "image/jpg")], avatar))
}

/// Search players by display name.
///
/// Without `q` every player is listed. The result maps SteamID64s to display names.
#[utoipa::path(
    get,
    path = "/api/players/search",
    tag = PLAYER_TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Player ids mapped to display names", body = std::collections::BTreeMap<String, String>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn search_players(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let service = PlayerService::new(&state.db, state.geolocation.as_ref());

    let players = service.search(params.q.as_deref()).await?;

    Ok(Json(players))
}

/// Get a fully initialized player for a trusted API client.
///
/// A player stored without a country gets it resolved from `ip` first.
///
/// # Access Control
/// - `X-API-KEY` - Must match the configured players API key
///
/// # Arguments
/// - `player_id` - SteamID64 of the player
/// - `params` - Address the player connected from
///
/// # Returns
/// - `200 OK` - The player
/// - `400 Bad Request` - `ip` is not an IP address
/// - `401 Unauthorized` - Missing or wrong API key
/// - `404 Not Found` - Unknown player
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/players/{player_id}",
    tag = PLAYER_TAG,
    params(
        ("player_id" = String, Path, description = "SteamID64 of the player"),
        InitializeParams
    ),
    responses(
        (status = 200, description = "Initialized player", body = PlayerDto),
        (status = 400, description = "Invalid IP address", body = ErrorDto),
        (status = 401, description = "Missing or invalid API key", body = ErrorDto),
        (status = 404, description = "Player not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
    security(("api_key" = []))
)]
pub async fn get_player(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(player_id): Path<String>,
    Query(params): Query<InitializeParams>,
) -> Result<impl IntoResponse, AppError> {
    ApiKeyGuard::new(&state.players_api_key, &headers).require()?;

    let ip = params
        .ip
        .parse::<IpAddr>()
        .map_err(|_| AppError::BadRequest(format!("Invalid IP address: {}", params.ip)))?;

    let service = PlayerService::new(&state.db, state.geolocation.as_ref());

    let player = service.get_initialized(&player_id, ip).await?;

    Ok(Json(player.into_dto()))
}
