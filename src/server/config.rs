use std::net::SocketAddr;

use crate::server::error::{config::ConfigError, AppError};

const STEAM_OPENID_URL: &str = "https://steamcommunity.com/openid/login";
const STEAM_WEB_API_URL: &str = "https://api.steampowered.com";
const GEOLOCATION_URL: &str = "http://ip-api.com/json";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,

    /// Public base URL of this server, used for the OpenID realm and return address.
    pub app_url: String,

    pub steam_api_key: String,
    /// Key expected in the `X-API-KEY` header of API key protected endpoints.
    pub players_api_key: String,
    /// Discord webhook for new player announcements; announcements are only logged when unset.
    pub discord_webhook_url: Option<String>,

    pub steam_openid_url: String,
    pub steam_web_api_url: String,
    pub geolocation_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                name: "BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            database_url: required_var("DATABASE_URL")?,
            bind_addr,
            app_url: required_var("APP_URL")?.trim_end_matches('/').to_string(),
            steam_api_key: required_var("STEAM_API_KEY")?,
            players_api_key: required_var("PLAYERS_API_KEY")?,
            discord_webhook_url: std::env::var("DISCORD_WEBHOOK_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            steam_openid_url: STEAM_OPENID_URL.to_string(),
            steam_web_api_url: STEAM_WEB_API_URL.to_string(),
            geolocation_url: GEOLOCATION_URL.to_string(),
        })
    }
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}
