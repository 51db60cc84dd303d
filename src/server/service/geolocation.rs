//! Caller geolocation through ip-api.com.

use std::net::IpAddr;

use async_trait::async_trait;
use serde::Deserialize;

use crate::server::error::AppError;

/// Status value ip-api.com reports for a successful lookup.
const LOOKUP_SUCCESS: &str = "success";

/// Result of a geolocation lookup as reported by ip-api.com.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLookup {
    /// `"success"` or `"fail"`. Private and reserved ranges always fail.
    pub status: String,
    /// ISO 3166-1 alpha-2 country code, only present on success.
    #[serde(default)]
    pub country_code: Option<String>,
}

impl GeoLookup {
    /// Returns the country code when the lookup succeeded, `None` otherwise.
    pub fn into_country_code(self) -> Option<String> {
        if self.status == LOOKUP_SUCCESS {
            self.country_code.filter(|code| !code.is_empty())
        } else {
            None
        }
    }
}

/// Maps a caller address to a country.
#[async_trait]
pub trait GeoLocator: Send + Sync {
    /// Looks up the location of `ip`.
    ///
    /// # Returns
    /// - `Ok(GeoLookup)` - The provider answered, successfully or not
    /// - `Err(AppError::ReqwestErr(_))` - Transport or decoding failure
    async fn lookup(&self, ip: IpAddr) -> Result<GeoLookup, AppError>;
}

/// `GeoLocator` backed by the free ip-api.com JSON endpoint.
pub struct IpApiClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl IpApiClient {
    /// Creates a new client.
    ///
    /// # Arguments
    /// - `http_client` - Shared HTTP client
    /// - `base_url` - Endpoint root, `http://ip-api.com/json` in production
    pub fn new(http_client: reqwest::Client, base_url: String) -> Self {
        Self {
            http_client,
            base_url,
        }
    }
}

#[async_trait]
impl GeoLocator for IpApiClient {
    async fn lookup(&self, ip: IpAddr) -> Result<GeoLookup, AppError> {
        let url = format!("{}/{}?fields=status,countryCode", self.base_url, ip);

        let lookup = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json::<GeoLookup>()
            .await?;

        Ok(lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_successful_lookup() {
        let lookup: GeoLookup =
            serde_json::from_str(r#"{"status":"success","countryCode":"US"}"#).unwrap();

        assert_eq!(lookup.into_country_code().as_deref(), Some("US"));
    }

    #[test]
    fn failed_lookup_has_no_country() {
        let lookup: GeoLookup = serde_json::from_str(
            r#"{"status":"fail","message":"private range","countryCode":"US"}"#,
        )
        .unwrap();

        assert_eq!(lookup.into_country_code(), None);
    }

    #[test]
    fn missing_country_code_is_absent() {
        let lookup: GeoLookup = serde_json::from_str(r#"{"status":"success"}"#).unwrap();

        assert_eq!(lookup.into_country_code(), None);
    }
}
