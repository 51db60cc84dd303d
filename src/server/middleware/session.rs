//! Type-safe session management wrapper.
//!
//! `AuthSession` owns every session key used by the player backend, preventing typos and
//! keeping the serialized shapes in one place.
//!
//! - `auth:identity` - Verified Steam OpenID claimed id, written by the sign-in callback
//! - `auth:claims` - `PlayerClaims` cached by the enrichment middleware once the player exists

use tower_sessions::Session;

use crate::server::{
    error::AppError, model::player::PlayerClaims, util::steam_id::player_id_from_identity,
};

const SESSION_AUTH_IDENTITY: &str = "auth:identity";
const SESSION_AUTH_CLAIMS: &str = "auth:claims";

/// Authentication session management.
///
/// Handles the signed in Steam identity and the claims resolved for it.
pub struct AuthSession<'a> {
    /// The underlying tower-sessions Session instance.
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    /// Creates a new AuthSession wrapper.
    ///
    /// # Arguments
    /// - `session` - Reference to the tower-sessions Session to wrap
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the verified Steam identity in the session.
    ///
    /// The session id is rotated first so a pre-login id cannot be reused after sign-in.
    /// Claims of any previous identity are dropped.
    ///
    /// # Arguments
    /// - `identity` - Steam OpenID claimed id confirmed by Steam
    ///
    /// # Returns
    /// - `Ok(())` - Identity successfully stored
    /// - `Err(AppError::SessionErr(_))` - Failed to store in session
    pub async fn set_identity(&self, identity: String) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session
            .remove::<PlayerClaims>(SESSION_AUTH_CLAIMS)
            .await?;
        self.session.insert(SESSION_AUTH_IDENTITY, identity).await?;
        Ok(())
    }

    /// Retrieves the raw Steam identity from the session.
    ///
    /// # Returns
    /// - `Ok(Some(identity))` - User is signed in
    /// - `Ok(None)` - No identity in session (signed out)
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn identity(&self) -> Result<Option<String>, AppError> {
        Ok(self.session.get::<String>(SESSION_AUTH_IDENTITY).await?)
    }

    /// Retrieves the SteamID64 of the signed in user.
    ///
    /// # Returns
    /// - `Ok(Some(player_id))` - User is signed in
    /// - `Ok(None)` - No identity in session
    /// - `Err(AppError::AuthErr(InvalidIdentity))` - Stored identity is not a Steam id
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn player_id(&self) -> Result<Option<String>, AppError> {
        let Some(identity) = self.identity().await? else {
            return Ok(None);
        };

        Ok(Some(player_id_from_identity(&identity)?))
    }

    /// Caches the resolved claims of the signed in player.
    pub async fn set_claims(&self, claims: &PlayerClaims) -> Result<(), AppError> {
        self.session.insert(SESSION_AUTH_CLAIMS, claims).await?;
        Ok(())
    }

    /// Retrieves the cached claims, if the player was resolved before.
    pub async fn claims(&self) -> Result<Option<PlayerClaims>, AppError> {
        Ok(self.session.get::<PlayerClaims>(SESSION_AUTH_CLAIMS).await?)
    }

    /// Drops cached claims that no longer match a stored player.
    pub async fn remove_claims(&self) -> Result<(), AppError> {
        self.session
            .remove::<PlayerClaims>(SESSION_AUTH_CLAIMS)
            .await?;
        Ok(())
    }

    /// Clears all data from the session.
    ///
    /// Used during sign-out.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}
