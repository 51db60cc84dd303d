use std::{sync::Arc, time::Duration};

use sea_orm::DatabaseConnection;
use serenity::http::Http;
use time::Duration as CookieDuration;
use tower_sessions::{cookie::SameSite, session_store::ExpiredDeletion, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::server::{
    config::Config,
    error::AppError,
    service::notification::{DiscordWebhookNotifier, LogNotifier, PlayerNotifier},
};

/// Sessions expire after this much inactivity.
const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Interval between sweeps of expired sessions.
const SESSION_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Timeout applied to every outbound request.
const HTTP_CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Installs the global tracing subscriber.
///
/// Filtering follows `RUST_LOG` and defaults to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Migrates the session table, starts a background sweep of expired sessions and
/// configures the cookie: `SameSite=Lax` so the Steam callback redirect carries it, and
/// `Secure` whenever the public URL is https.
///
/// # Arguments
/// - `db` - Connected application database
/// - `config` - Application configuration containing the public URL
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Session layer ready to wrap the router
/// - `Err(AppError::SqlxErr(_))` - Failed to create the session table
pub async fn connect_to_session(
    db: &DatabaseConnection,
    config: &Config,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let session_store = SqliteStore::new(db.get_sqlite_connection_pool().clone());
    session_store.migrate().await?;

    let deletion_store = session_store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(e) = deletion_store.delete_expired().await {
                tracing::error!("Failed to delete expired sessions: {}", e);
            }
        }
    });

    let session = SessionManagerLayer::new(session_store)
        .with_secure(config.app_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(CookieDuration::days(
            SESSION_INACTIVITY_DAYS,
        )));

    Ok(session)
}

/// Builds the shared HTTP client for Steam and geolocation requests.
///
/// Redirects are not followed so a crafted avatar or profile URL cannot bounce requests
/// onto internal hosts.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(HTTP_CLIENT_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Picks the new player announcer.
///
/// Posts to Discord when a webhook URL is configured, otherwise only logs.
pub fn setup_notifier(config: &Config, db: &DatabaseConnection) -> Arc<dyn PlayerNotifier> {
    match &config.discord_webhook_url {
        Some(webhook_url) => Arc::new(DiscordWebhookNotifier::new(
            db.clone(),
            Arc::new(Http::new("")),
            webhook_url.clone(),
            config.app_url.clone(),
        )),
        None => {
            tracing::warn!("DISCORD_WEBHOOK_URL is not set, new players will only be logged");
            Arc::new(LogNotifier)
        }
    }
}
