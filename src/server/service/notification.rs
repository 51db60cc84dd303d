//! New player announcements.
//!
//! Announcements are dispatched by the enrichment flow on a detached task. Implementations
//! report failures through their `Result`, the caller only logs them.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use serenity::{
    all::{CreateEmbed, CreateEmbedFooter, ExecuteWebhook, Timestamp, Webhook},
    http::Http,
};

use crate::server::{data::player::PlayerRepository, error::AppError};

/// Embed color used for new player announcements.
const PLAYER_CREATED_COLOR: u32 = 0x2ecc71;

/// Announces newly registered players.
#[async_trait]
pub trait PlayerNotifier: Send + Sync {
    /// Announces that the player with `player_id` was created.
    async fn notify_player_created(&self, player_id: &str) -> Result<(), AppError>;
}

/// Posts an embed to a Discord webhook for every new player.
pub struct DiscordWebhookNotifier {
    db: DatabaseConnection,
    http: Arc<Http>,
    webhook_url: String,
    app_url: String,
}

impl DiscordWebhookNotifier {
    /// Creates a new notifier.
    ///
    /// # Arguments
    /// - `db` - Database connection used to load the announced player
    /// - `http` - Discord HTTP client, no bot token is needed for webhooks
    /// - `webhook_url` - Full Discord webhook URL including its token
    /// - `app_url` - Base URL of this server, used for the avatar thumbnail
    pub fn new(db: DatabaseConnection, http: Arc<Http>, webhook_url: String, app_url: String) -> Self {
        Self {
            db,
            http,
            webhook_url,
            app_url,
        }
    }

    fn build_embed(&self, player_id: &str, name: &str, country_code: Option<&str>) -> CreateEmbed {
        CreateEmbed::new()
            .title("New player registered")
            .url(format!("https://steamcommunity.com/profiles/{}", player_id))
            .description(format!("**{}** signed in for the first time.", name))
            .thumbnail(format!("{}/api/players/avatar/{}", self.app_url, player_id))
            .field("Steam ID", player_id, true)
            .field("Country", country_code.unwrap_or("Unknown"), true)
            .color(PLAYER_CREATED_COLOR)
            .footer(CreateEmbedFooter::new("Playerbase"))
            .timestamp(Timestamp::now())
    }
}

#[async_trait]
impl PlayerNotifier for DiscordWebhookNotifier {
    async fn notify_player_created(&self, player_id: &str) -> Result<(), AppError> {
        let player = PlayerRepository::new(&self.db)
            .find_by_id(player_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Player {} not found", player_id)))?;

        let embed = self.build_embed(
            &player.player_id,
            &player.name,
            player.country_code.as_deref(),
        );

        let webhook = Webhook::from_url(self.http.as_ref(), &self.webhook_url).await?;
        webhook
            .execute(self.http.as_ref(), false, ExecuteWebhook::new().embed(embed))
            .await?;

        tracing::debug!("Announced new player {} on Discord", player_id);

        Ok(())
    }
}

/// Notifier used when no webhook is configured; announcements only reach the log.
pub struct LogNotifier;

#[async_trait]
impl PlayerNotifier for LogNotifier {
    async fn notify_player_created(&self, player_id: &str) -> Result<(), AppError> {
        tracing::info!("New player registered: {}", player_id);
        Ok(())
    }
}
