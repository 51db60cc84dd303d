//! Steam sign-in over OpenID 2.0.
//!
//! Steam does not offer OAuth2 for third-party sign-in, only OpenID 2.0 in stateless mode.
//! `login_url` sends the user to Steam; `verify` replays the returned assertion to Steam
//! with `openid.mode=check_authentication` and yields the claimed id on success.

use std::collections::BTreeMap;

use url::Url;

use crate::server::{
    error::{auth::AuthError, AppError},
    util::steam_id::player_id_from_identity,
};

const OPENID_NS: &str = "http://specs.openid.net/auth/2.0";
const OPENID_IDENTIFIER_SELECT: &str = "http://specs.openid.net/auth/2.0/identifier_select";

/// Path Steam redirects back to after sign-in.
pub const CALLBACK_PATH: &str = "/signin/callback";

/// Service for the Steam OpenID sign-in handshake.
pub struct SteamOpenIdService<'a> {
    /// HTTP client for the verification request.
    pub http_client: &'a reqwest::Client,
    /// Steam's OpenID endpoint.
    pub openid_url: &'a str,
    /// Public base URL of this server.
    pub app_url: &'a str,
}

impl<'a> SteamOpenIdService<'a> {
    /// Creates a new SteamOpenIdService instance.
    pub fn new(http_client: &'a reqwest::Client, openid_url: &'a str, app_url: &'a str) -> Self {
        Self {
            http_client,
            openid_url,
            app_url,
        }
    }

    /// Address Steam must send the user back to.
    pub fn callback_url(&self) -> String {
        format!("{}{}", self.app_url, CALLBACK_PATH)
    }

    /// Generates the Steam sign-in URL.
    ///
    /// Uses identifier select so Steam picks the account, with this server as realm and
    /// the callback as return address.
    ///
    /// # Returns
    /// - `Ok(Url)` - URL to redirect the user to
    /// - `Err(AppError::InternalError)` - Configured OpenID endpoint is not a valid URL
    pub fn login_url(&self) -> Result<Url, AppError> {
        let callback_url = self.callback_url();

        Url::parse_with_params(
            self.openid_url,
            &[
                ("openid.ns", OPENID_NS),
                ("openid.mode", "checkid_setup"),
                ("openid.return_to", callback_url.as_str()),
                ("openid.realm", self.app_url),
                ("openid.identity", OPENID_IDENTIFIER_SELECT),
                ("openid.claimed_id", OPENID_IDENTIFIER_SELECT),
            ],
        )
        .map_err(|e| AppError::InternalError(format!("Invalid Steam OpenID URL: {}", e)))
    }

    /// Verifies the assertion Steam appended to the callback.
    ///
    /// # Arguments
    /// - `params` - All query parameters of the callback request
    ///
    /// # Returns
    /// - `Ok(String)` - The verified Steam claimed id
    /// - `Err(AppError::AuthErr(OpenIdVerificationFailed))` - Malformed callback or Steam
    ///   did not confirm the assertion
    /// - `Err(AppError::AuthErr(InvalidIdentity))` - Claimed id is not a Steam id
    /// - `Err(AppError::ReqwestErr(_))` - Verification request failed
    pub async fn verify(&self, params: &BTreeMap<String, String>) -> Result<String, AppError> {
        let claimed_id = self.check_assertion(params)?;

        let response = self
            .http_client
            .post(self.openid_url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(check_authentication_body(params))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if !is_valid_assertion(&response) {
            return Err(AuthError::OpenIdVerificationFailed(
                "Steam did not confirm the assertion".to_string(),
            )
            .into());
        }

        Ok(claimed_id)
    }

    /// Checks the callback parameters locally before asking Steam.
    ///
    /// # Returns
    /// - `Ok(String)` - The claimed id of the assertion
    /// - `Err(AppError::AuthErr(_))` - Wrong mode, endpoint or return address, or a
    ///   claimed id that is not a Steam id
    pub fn check_assertion(&self, params: &BTreeMap<String, String>) -> Result<String, AppError> {
        let param = |key: &str| params.get(key).map(String::as_str);

        if param("openid.mode") != Some("id_res") {
            return Err(AuthError::OpenIdVerificationFailed(format!(
                "unexpected openid.mode {:?}",
                param("openid.mode")
            ))
            .into());
        }

        if param("openid.op_endpoint") != Some(self.openid_url) {
            return Err(AuthError::OpenIdVerificationFailed(
                "assertion was issued by another provider".to_string(),
            )
            .into());
        }

        if param("openid.return_to") != Some(self.callback_url().as_str()) {
            return Err(AuthError::OpenIdVerificationFailed(
                "assertion was issued for another return address".to_string(),
            )
            .into());
        }

        let claimed_id = param("openid.claimed_id").ok_or_else(|| {
            AuthError::OpenIdVerificationFailed("missing openid.claimed_id".to_string())
        })?;

        player_id_from_identity(claimed_id)?;

        Ok(claimed_id.to_string())
    }
}

/// Builds the form body replaying an assertion with `check_authentication` mode.
///
/// Only `openid.*` parameters are forwarded.
pub fn check_authentication_body(params: &BTreeMap<String, String>) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());

    for (key, value) in params.iter().filter(|(key, _)| key.starts_with("openid.")) {
        if key == "openid.mode" {
            serializer.append_pair(key, "check_authentication");
        } else {
            serializer.append_pair(key, value);
        }
    }

    serializer.finish()
}

/// Reads Steam's key-value verification answer.
pub fn is_valid_assertion(response: &str) -> bool {
    response
        .lines()
        .filter_map(|line| line.split_once(':'))
        .any(|(key, value)| key.trim() == "is_valid" && value.trim() == "true")
}
