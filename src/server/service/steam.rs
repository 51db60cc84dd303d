//! Steam Web API profile lookups.

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::server::error::AppError;

/// Public profile fields of a Steam account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SteamProfile {
    #[serde(rename = "steamid")]
    pub steam_id: String,
    #[serde(rename = "personaname")]
    pub display_name: String,
    /// URL of the 184x184 avatar image.
    #[serde(rename = "avatarfull")]
    pub avatar_url: String,
}

#[derive(Deserialize)]
struct PlayerSummariesEnvelope {
    response: PlayerSummaries,
}

#[derive(Deserialize)]
struct PlayerSummaries {
    #[serde(default)]
    players: Vec<SteamProfile>,
}

/// Identity provider profile access.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Fetches the public profile of a SteamID64.
    ///
    /// # Returns
    /// - `Ok(Some(SteamProfile))` - Profile found
    /// - `Ok(None)` - Steam has no profile for that id
    /// - `Err(AppError::ReqwestErr(_))` - Transport or decoding failure
    async fn get_profile(&self, steam_id: &str) -> Result<Option<SteamProfile>, AppError>;

    /// Downloads the avatar image behind a profile's avatar URL.
    async fn get_avatar(&self, avatar_url: &str) -> Result<Vec<u8>, AppError>;
}

/// `ProfileProvider` backed by `ISteamUser/GetPlayerSummaries`.
pub struct SteamWebApiClient {
    http_client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl SteamWebApiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// - `http_client` - Shared HTTP client
    /// - `api_url` - Web API root, `https://api.steampowered.com` in production
    /// - `api_key` - Steam Web API key
    pub fn new(http_client: reqwest::Client, api_url: String, api_key: String) -> Self {
        Self {
            http_client,
            api_url,
            api_key,
        }
    }

    fn player_summaries_url(&self, steam_id: &str) -> Result<Url, AppError> {
        Url::parse_with_params(
            &format!("{}/ISteamUser/GetPlayerSummaries/v0002/", self.api_url),
            &[("key", self.api_key.as_str()), ("steamids", steam_id)],
        )
        .map_err(|e| AppError::InternalError(format!("Invalid Steam Web API URL: {}", e)))
    }
}

#[async_trait]
impl ProfileProvider for SteamWebApiClient {
    async fn get_profile(&self, steam_id: &str) -> Result<Option<SteamProfile>, AppError> {
        let url = self.player_summaries_url(steam_id)?;

        let summaries = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<PlayerSummariesEnvelope>()
            .await?;

        Ok(find_profile(summaries, steam_id))
    }

    async fn get_avatar(&self, avatar_url: &str) -> Result<Vec<u8>, AppError> {
        let response = self
            .http_client
            .get(avatar_url)
            .send()
            .await?
            .error_for_status()?;

        let status = response.status();
        let bytes = response.bytes().await?;

        avatar_from_response(avatar_url, status, bytes.to_vec())
    }
}

/// Accepts only a 2xx answer with a non-empty body as avatar image.
///
/// The shared client does not follow redirects, so a 3xx reaches this check and fails.
fn avatar_from_response(
    avatar_url: &str,
    status: reqwest::StatusCode,
    bytes: Vec<u8>,
) -> Result<Vec<u8>, AppError> {
    if !status.is_success() {
        return Err(AppError::InternalError(format!(
            "Avatar download from {} answered {}",
            avatar_url, status
        )));
    }

    if bytes.is_empty() {
        return Err(AppError::InternalError(format!(
            "Avatar download from {} returned no data",
            avatar_url
        )));
    }

    Ok(bytes)
}

fn find_profile(summaries: PlayerSummariesEnvelope, steam_id: &str) -> Option<SteamProfile> {
    summaries
        .response
        .players
        .into_iter()
        .find(|profile| profile.steam_id == steam_id)
}
