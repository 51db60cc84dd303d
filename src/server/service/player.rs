//! Player read operations behind the player endpoints.

use std::{collections::BTreeMap, net::IpAddr};

use sea_orm::DatabaseConnection;

use crate::server::{
    data::player::PlayerRepository, error::AppError, model::player::Player,
    service::geolocation::GeoLocator,
};

/// Service providing the player endpoint operations.
pub struct PlayerService<'a> {
    db: &'a DatabaseConnection,
    geolocation: &'a dyn GeoLocator,
}

impl<'a> PlayerService<'a> {
    /// Creates a new PlayerService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `geolocation` - Country lookup used by `get_initialized`
    pub fn new(db: &'a DatabaseConnection, geolocation: &'a dyn GeoLocator) -> Self {
        Self { db, geolocation }
    }

    /// Gets the player of the current session.
    ///
    /// # Arguments
    /// - `player_id` - SteamID64 from the session, `None` when signed out
    ///
    /// # Returns
    /// - `Ok(Some(Player))` - Signed in and registered
    /// - `Ok(None)` - Signed out, or not registered yet
    /// - `Err(AppError::DbErr(_))` - Database error
    pub async fn get_current(&self, player_id: Option<&str>) -> Result<Option<Player>, AppError> {
        let Some(player_id) = player_id else {
            return Ok(None);
        };

        Ok(PlayerRepository::new(self.db).find_by_id(player_id).await?)
    }

    /// Gets the stored avatar image of a player.
    ///
    /// # Returns
    /// - `Ok(Vec<u8>)` - Avatar bytes as downloaded from Steam
    /// - `Err(AppError::NotFound)` - Unknown player or no stored avatar
    /// - `Err(AppError::DbErr(_))` - Database error
    pub async fn get_avatar(&self, player_id: &str) -> Result<Vec<u8>, AppError> {
        PlayerRepository::new(self.db)
            .find_avatar(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No avatar for player {}", player_id)))
    }

    /// Maps player ids to display names, optionally narrowed by a name fragment.
    pub async fn search(&self, name_filter: Option<&str>) -> Result<BTreeMap<String, String>, AppError> {
        let name_filter = name_filter.map(str::trim).filter(|name| !name.is_empty());

        Ok(PlayerRepository::new(self.db).search(name_filter).await?)
    }

    /// Gets a fully initialized player on behalf of a trusted API client.
    ///
    /// A player registered without a country gets it backfilled from `ip`. Geolocation
    /// failures leave the country empty and still return the player.
    ///
    /// # Arguments
    /// - `player_id` - SteamID64 of the player
    /// - `ip` - Address the API client saw the player connect from
    ///
    /// # Returns
    /// - `Ok(Player)` - The stored player, country backfilled when possible
    /// - `Err(AppError::NotFound)` - Unknown player
    /// - `Err(AppError::DbErr(_))` - Database error
    pub async fn get_initialized(&self, player_id: &str, ip: IpAddr) -> Result<Player, AppError> {
        let repo = PlayerRepository::new(self.db);

        let player = repo
            .find_by_id(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Player {} not found", player_id)))?;

        if player.country_code.is_some() {
            return Ok(player);
        }

        let country_code = match self.geolocation.lookup(ip).await {
            Ok(lookup) => lookup.into_country_code(),
            Err(e) => {
                tracing::warn!("Geolocation lookup for {} failed: {}", ip, e);
                None
            }
        };

        let Some(country_code) = country_code else {
            return Ok(player);
        };

        repo.set_country_code_if_absent(player_id, &country_code)
            .await?;

        repo.find_by_id(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Player {} not found", player_id)))
    }
}
