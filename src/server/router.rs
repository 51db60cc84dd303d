use axum::{middleware, routing::get, Router};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{api::ErrorDto, player::PlayerDto},
    server::{
        controller::{
            auth::{callback, signin, signout},
            player::{
                self, get_current_player, get_player, get_player_avatar, search_players,
                PLAYER_TAG,
            },
        },
        middleware::{auth::API_KEY_HEADER, enrichment::enrich_session},
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        player::get_current_player,
        player::get_player_avatar,
        player::search_players,
        player::get_player,
    ),
    components(schemas(PlayerDto, ErrorDto)),
    modifiers(&ApiKeySecurity),
    tags(
        (name = PLAYER_TAG, description = "Steam player profiles")
    )
)]
pub struct ApiDoc;

struct ApiKeySecurity;

impl Modify for ApiKeySecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
        );
    }
}

/// Builds the application router.
///
/// Every route passes through the session enrichment middleware. The session layer must
/// wrap the returned router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/signin", get(signin))
        .route("/signin/callback", get(callback))
        .route("/signout", get(signout))
        .route("/api/players", get(get_current_player))
        .route("/api/players/search", get(search_players))
        .route("/api/players/avatar/{player_id}", get(get_player_avatar))
        .route("/api/players/{player_id}", get(get_player))
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(state.clone(), enrich_session))
        .with_state(state)
}
