use crate::server::error::{auth::AuthError, AppError};

/// Prefix of every claimed id returned by Steam's OpenID 2.0 provider.
///
/// Steam documents its OpenID claimed ids as
/// `https://steamcommunity.com/openid/id/<steamid64>`.
pub const STEAM_OPENID_IDENTITY_PREFIX: &str = "https://steamcommunity.com/openid/id/";

/// Extracts the SteamID64 from a Steam OpenID claimed id.
///
/// Accepts the `http://` form as well, which older Steam responses still use.
///
/// # Arguments
/// - `identity` - The raw OpenID claimed id
///
/// # Returns
/// - `Ok(String)` - The decimal SteamID64
/// - `Err(AppError::AuthErr(InvalidIdentity))` - Not a Steam claimed id, or the trailing
///   segment is not a 64-bit decimal id
pub fn player_id_from_identity(identity: &str) -> Result<String, AppError> {
    let steam_id = identity
        .strip_prefix(STEAM_OPENID_IDENTITY_PREFIX)
        .or_else(|| identity.strip_prefix("http://steamcommunity.com/openid/id/"))
        .ok_or_else(|| AuthError::InvalidIdentity(identity.to_string()))?;

    if steam_id.is_empty() || !steam_id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AuthError::InvalidIdentity(identity.to_string()).into());
    }

    steam_id
        .parse::<u64>()
        .map_err(|_| AuthError::InvalidIdentity(identity.to_string()))?;

    Ok(steam_id.to_string())
}
