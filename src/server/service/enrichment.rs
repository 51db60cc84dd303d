//! First-sight player registration for authenticated sessions.
//!
//! Every request that carries a Steam identity passes through `SessionEnrichmentService`.
//! Known players only get their claims resolved. Unknown players are registered: the caller's
//! country is resolved, the Steam profile and avatar are fetched, the row is created, and a
//! detached task announces the new player.

use std::{net::IpAddr, sync::Arc};

use sea_orm::DatabaseConnection;

use crate::server::{
    data::player::PlayerRepository,
    error::AppError,
    model::player::{CreatePlayerParam, Player, PlayerClaims},
    service::{geolocation::GeoLocator, notification::PlayerNotifier, steam::ProfileProvider},
    util::steam_id::player_id_from_identity,
};

/// Service resolving session claims and registering players on first sight.
pub struct SessionEnrichmentService<'a> {
    db: &'a DatabaseConnection,
    geolocation: &'a dyn GeoLocator,
    profiles: &'a dyn ProfileProvider,
    /// Owned so it can move into the detached announcement task.
    notifier: Arc<dyn PlayerNotifier>,
}

impl<'a> SessionEnrichmentService<'a> {
    /// Creates a new SessionEnrichmentService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `geolocation` - Country lookup for the registering caller
    /// - `profiles` - Steam profile and avatar access
    /// - `notifier` - Announcer for newly created players
    pub fn new(
        db: &'a DatabaseConnection,
        geolocation: &'a dyn GeoLocator,
        profiles: &'a dyn ProfileProvider,
        notifier: Arc<dyn PlayerNotifier>,
    ) -> Self {
        Self {
            db,
            geolocation,
            profiles,
            notifier,
        }
    }

    /// Ensures the session's player exists and returns its claims.
    ///
    /// On first sight of a SteamID64 the player is registered. Geolocation failures only
    /// leave the country empty. A missing Steam profile skips registration and yields no
    /// claims; the next request tries again since nothing was stored.
    ///
    /// # Arguments
    /// - `identity` - Raw Steam OpenID claimed id stored in the session
    /// - `remote_ip` - Address of the caller, if known
    ///
    /// # Returns
    /// - `Ok(Some(PlayerClaims))` - Player exists (already or now), claims to attach
    /// - `Ok(None)` - Steam has no profile for the id, no player was created
    /// - `Err(AppError::AuthErr(InvalidIdentity))` - Identity is not a Steam claimed id
    /// - `Err(AppError)` - Profile fetch, avatar download or database failure
    pub async fn enrich(
        &self,
        identity: &str,
        remote_ip: Option<IpAddr>,
    ) -> Result<Option<PlayerClaims>, AppError> {
        let player_id = player_id_from_identity(identity)?;

        let player = match PlayerRepository::new(self.db).find_by_id(&player_id).await? {
            Some(player) => player,
            None => match self.register(&player_id, remote_ip).await? {
                Some(player) => player,
                None => return Ok(None),
            },
        };

        Ok(Some(PlayerClaims::from(&player)))
    }

    /// Registers a player that was not found in the store.
    ///
    /// # Returns
    /// - `Ok(Some(Player))` - Canonical stored player
    /// - `Ok(None)` - Steam returned no profile
    async fn register(
        &self,
        player_id: &str,
        remote_ip: Option<IpAddr>,
    ) -> Result<Option<Player>, AppError> {
        let country_code = self.resolve_country_code(remote_ip).await;

        let Some(profile) = self.profiles.get_profile(player_id).await? else {
            tracing::warn!("Steam returned no profile for {}, skipping registration", player_id);
            return Ok(None);
        };

        let avatar = self.profiles.get_avatar(&profile.avatar_url).await?;

        let (player, created) = PlayerRepository::new(self.db)
            .create_if_absent(CreatePlayerParam {
                player_id: player_id.to_string(),
                name: profile.display_name,
                country_code,
                avatar,
            })
            .await?;

        if created {
            tracing::info!("Registered player {} ({})", player.name, player.player_id);
            self.dispatch_created_notification(player.player_id.clone());
        }

        Ok(Some(player))
    }

    /// Resolves the caller's country, absorbing every failure as "unknown".
    async fn resolve_country_code(&self, remote_ip: Option<IpAddr>) -> Option<String> {
        let ip = remote_ip?;

        match self.geolocation.lookup(ip).await {
            Ok(lookup) => lookup.into_country_code(),
            Err(e) => {
                tracing::warn!("Geolocation lookup for {} failed: {}", ip, e);
                None
            }
        }
    }

    /// Announces a new player on a detached task.
    ///
    /// The task is never awaited or retried; its failure is only logged.
    fn dispatch_created_notification(&self, player_id: String) {
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(async move {
            if let Err(e) = notifier.notify_player_created(&player_id).await {
                tracing::error!("Failed to announce new player {}: {}", player_id, e);
            }
        });
    }
}
