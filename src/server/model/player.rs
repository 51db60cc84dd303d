//! Player domain models and parameters.
//!
//! A player is the persisted profile of one Steam account. It is created once, on the first
//! authenticated request for that account, and read by the player endpoints afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::player::PlayerDto;

/// Role assigned by the store to newly registered players.
pub const DEFAULT_PLAYER_ROLE: &str = "Player";

/// Player columns without the avatar, in select order: id, name, country, role, creation time.
pub type PlayerColumns = (String, String, Option<String>, String, DateTime<Utc>);

/// Persisted player profile.
///
/// The avatar is kept out of this model; it is only loaded by the avatar endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// SteamID64 of the player.
    pub player_id: String,
    /// Steam display name captured at registration.
    pub name: String,
    /// Country resolved from the registering request's address.
    pub country_code: Option<String>,
    /// Authorization role.
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Converts the player domain model to a DTO for API responses.
    pub fn into_dto(self) -> PlayerDto {
        PlayerDto {
            player_id: self.player_id,
            name: self.name,
            country_code: self.country_code,
            role: self.role,
            created_at: self.created_at,
        }
    }

    /// Builds a player from the avatar-less column projection used by the repository.
    pub fn from_columns(
        (player_id, name, country_code, role, created_at): PlayerColumns,
    ) -> Self {
        Self {
            player_id,
            name,
            country_code,
            role,
            created_at,
        }
    }
}

/// Parameters for registering a new player.
#[derive(Debug, Clone)]
pub struct CreatePlayerParam {
    /// SteamID64 of the player.
    pub player_id: String,
    /// Steam display name.
    pub name: String,
    pub country_code: Option<String>,
    /// Avatar image bytes downloaded from Steam.
    pub avatar: Vec<u8>,
}

/// Claims attached to an authenticated request once its player exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerClaims {
    /// Name claim, the player's SteamID64.
    pub name: String,
    /// Role claim.
    pub role: String,
}

impl From<&Player> for PlayerClaims {
    fn from(player: &Player) -> Self {
        Self {
            name: player.player_id.clone(),
            role: player.role.clone(),
        }
    }
}
