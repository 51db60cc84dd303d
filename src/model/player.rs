use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
  "player_id": "76561198000000000",
  "name": "Alice",
  "country_code": "US",
  "role": "Player",
  "created_at": "2026-10-16T12:00:00Z"
}))]
pub struct PlayerDto {
    /// SteamID64 of the player.
    pub player_id: String,
    /// Steam display name captured at registration.
    pub name: String,
    /// ISO 3166-1 alpha-2 country code, if it could be resolved.
    pub country_code: Option<String>,
    /// Authorization role.
    pub role: String,
    pub created_at: DateTime<Utc>,
}
