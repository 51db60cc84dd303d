//! Player data repository for database operations.
//!
//! This module provides the `PlayerRepository`, the player store used by the enrichment flow
//! and the player endpoints. Rows are converted to domain models at this boundary.

use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::server::model::player::{
    CreatePlayerParam, Player, PlayerColumns, DEFAULT_PLAYER_ROLE,
};

/// Repository providing database operations for player records.
pub struct PlayerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PlayerRepository<'a> {
    /// Creates a new PlayerRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `PlayerRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a player by SteamID64.
    ///
    /// The avatar column is not read; it is only loaded by `find_avatar`.
    ///
    /// # Arguments
    /// - `player_id` - SteamID64 of the player
    ///
    /// # Returns
    /// - `Ok(Some(Player))` - Player found
    /// - `Ok(None)` - No player with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, player_id: &str) -> Result<Option<Player>, DbErr> {
        let columns: Option<PlayerColumns> =
            entity::prelude::Player::find_by_id(player_id.to_string())
                .select_only()
                .columns([
                    entity::player::Column::PlayerId,
                    entity::player::Column::Name,
                    entity::player::Column::CountryCode,
                    entity::player::Column::Role,
                    entity::player::Column::CreatedAt,
                ])
                .into_tuple()
                .one(self.db)
                .await?;

        Ok(columns.map(Player::from_columns))
    }

    /// Inserts a player unless one with the same id already exists.
    ///
    /// The insert uses `ON CONFLICT DO NOTHING` on the primary key, so concurrent
    /// registrations of the same id leave exactly one row and exactly one caller observes
    /// `created == true`. The stored row is read back afterwards so the caller receives the
    /// canonical record including store defaults (role, creation time). An existing row is
    /// never modified.
    ///
    /// # Arguments
    /// - `param` - Id, name, country and avatar of the new player
    ///
    /// # Returns
    /// - `Ok((Player, true))` - Row inserted by this call
    /// - `Ok((Player, false))` - Row already existed, returned unchanged
    /// - `Err(DbErr)` - Database error during insert or read back
    pub async fn create_if_absent(&self, param: CreatePlayerParam) -> Result<(Player, bool), DbErr> {
        let player_id = param.player_id;

        let insert = entity::prelude::Player::insert(entity::player::ActiveModel {
            player_id: ActiveValue::Set(player_id.clone()),
            name: ActiveValue::Set(param.name),
            country_code: ActiveValue::Set(param.country_code),
            role: ActiveValue::Set(DEFAULT_PLAYER_ROLE.to_string()),
            avatar: ActiveValue::Set(Some(param.avatar)),
            created_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::player::Column::PlayerId)
                .do_nothing()
                .to_owned(),
        );

        let created = match insert.exec_without_returning(self.db).await {
            Ok(rows_affected) => rows_affected > 0,
            Err(DbErr::RecordNotInserted) => false,
            Err(e) => return Err(e),
        };

        let player = self.find_by_id(&player_id).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!("Player {} missing after insert", player_id))
        })?;

        Ok((player, created))
    }

    /// Returns a mapping of player id to display name.
    ///
    /// Without a filter this is a projection of the whole table. With a filter only players
    /// whose name contains the given text are returned (SQLite `LIKE`, ASCII case
    /// insensitive).
    ///
    /// # Arguments
    /// - `name_filter` - Optional substring the display name must contain
    ///
    /// # Returns
    /// - `Ok(BTreeMap<String, String>)` - Player ids mapped to display names
    /// - `Err(DbErr)` - Database error during query
    pub async fn search(&self, name_filter: Option<&str>) -> Result<BTreeMap<String, String>, DbErr> {
        let mut query = entity::prelude::Player::find()
            .select_only()
            .column(entity::player::Column::PlayerId)
            .column(entity::player::Column::Name)
            .order_by_asc(entity::player::Column::Name);

        if let Some(name) = name_filter {
            query = query.filter(entity::player::Column::Name.contains(name));
        }

        let rows: Vec<(String, String)> = query.into_tuple().all(self.db).await?;

        Ok(rows.into_iter().collect())
    }

    /// Loads the stored avatar bytes of a player.
    ///
    /// # Returns
    /// - `Ok(Some(bytes))` - Player exists and has an avatar
    /// - `Ok(None)` - Unknown player, or no avatar stored
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_avatar(&self, player_id: &str) -> Result<Option<Vec<u8>>, DbErr> {
        let entity = entity::prelude::Player::find_by_id(player_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.and_then(|player| player.avatar))
    }

    /// Sets the country code of a player that does not have one yet.
    ///
    /// Rows that already carry a country code are left untouched.
    ///
    /// # Returns
    /// - `Ok(true)` - Country code written
    /// - `Ok(false)` - Unknown player or country already set
    /// - `Err(DbErr)` - Database error during update
    pub async fn set_country_code_if_absent(
        &self,
        player_id: &str,
        country_code: &str,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::Player::update_many()
            .filter(entity::player::Column::PlayerId.eq(player_id))
            .filter(entity::player::Column::CountryCode.is_null())
            .col_expr(
                entity::player::Column::CountryCode,
                Expr::value(country_code),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
