mod model;
mod server;

use std::{net::SocketAddr, sync::Arc};

use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::server::{
    config::Config,
    error::AppError,
    router,
    service::{geolocation::IpApiClient, steam::SteamWebApiClient},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db, &config).await?;
    let http_client = startup::setup_reqwest_client()?;
    let notifier = startup::setup_notifier(&config, &db);

    let state = AppState {
        geolocation: Arc::new(IpApiClient::new(
            http_client.clone(),
            config.geolocation_url.clone(),
        )),
        profiles: Arc::new(SteamWebApiClient::new(
            http_client.clone(),
            config.steam_web_api_url.clone(),
            config.steam_api_key.clone(),
        )),
        notifier,
        db,
        http_client,
        app_url: config.app_url.clone(),
        steam_openid_url: config.steam_openid_url.clone(),
        players_api_key: config.players_api_key.clone(),
    };

    let app = router::router(state)
        .layer(session)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
