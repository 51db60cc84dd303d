//! Player factory for creating test player entities.

use crate::factory::helpers::next_steam_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test players with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::player::PlayerFactory;
///
/// let player = PlayerFactory::new(&db)
///     .player_id("76561198000000000")
///     .name("Alice")
///     .role("Admin")
///     .build()
///     .await?;
/// ```
pub struct PlayerFactory<'a> {
    db: &'a DatabaseConnection,
    player_id: String,
    name: String,
    country_code: Option<String>,
    role: String,
    avatar: Option<Vec<u8>>,
}

impl<'a> PlayerFactory<'a> {
    /// Creates a new PlayerFactory with default values.
    ///
    /// Defaults:
    /// - player_id: a unique SteamID64
    /// - name: `"Player {player_id}"`
    /// - country_code: `None`
    /// - role: `"Player"`
    /// - avatar: a few placeholder bytes
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let player_id = next_steam_id();
        Self {
            db,
            name: format!("Player {}", player_id),
            player_id,
            country_code: None,
            role: "Player".to_string(),
            avatar: Some(vec![0xFF, 0xD8, 0xFF, 0xE0]),
        }
    }

    /// Sets the SteamID64 of the player.
    pub fn player_id(mut self, player_id: impl Into<String>) -> Self {
        self.player_id = player_id.into();
        self
    }

    /// Sets the display name of the player.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the country code of the player.
    pub fn country_code(mut self, country_code: Option<&str>) -> Self {
        self.country_code = country_code.map(str::to_string);
        self
    }

    /// Sets the authorization role of the player.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Sets the stored avatar bytes, `None` to store no avatar.
    pub fn avatar(mut self, avatar: Option<Vec<u8>>) -> Self {
        self.avatar = avatar;
        self
    }

    /// Builds and inserts the player entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::player::Model)` - Created player entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::player::Model, DbErr> {
        entity::player::ActiveModel {
            player_id: ActiveValue::Set(self.player_id),
            name: ActiveValue::Set(self.name),
            country_code: ActiveValue::Set(self.country_code),
            role: ActiveValue::Set(self.role),
            avatar: ActiveValue::Set(self.avatar),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a player with default values.
///
/// Shorthand for `PlayerFactory::new(db).build().await`.
pub async fn create_player(db: &DatabaseConnection) -> Result<entity::player::Model, DbErr> {
    PlayerFactory::new(db).build().await
}

/// Creates a player with a specific SteamID64.
///
/// Shorthand for `PlayerFactory::new(db).player_id(player_id).build().await`.
pub async fn create_player_with_id(
    db: &DatabaseConnection,
    player_id: impl Into<String>,
) -> Result<entity::player::Model, DbErr> {
    PlayerFactory::new(db).player_id(player_id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_player_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Player).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let player = create_player(db).await?;

        assert_eq!(player.player_id.len(), 17);
        assert!(!player.name.is_empty());
        assert_eq!(player.role, "Player");
        assert!(player.country_code.is_none());
        assert!(player.avatar.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn creates_player_with_custom_values() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Player).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let player = PlayerFactory::new(db)
            .player_id("76561198000000000")
            .name("Alice")
            .country_code(Some("US"))
            .role("Admin")
            .avatar(None)
            .build()
            .await?;

        assert_eq!(player.player_id, "76561198000000000");
        assert_eq!(player.name, "Alice");
        assert_eq!(player.country_code.as_deref(), Some("US"));
        assert_eq!(player.role, "Admin");
        assert!(player.avatar.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn creates_multiple_unique_players() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_table(Player).build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let first = create_player(db).await?;
        let second = create_player(db).await?;

        assert_ne!(first.player_id, second.player_id);
        assert_ne!(first.name, second.name);

        Ok(())
    }
}
