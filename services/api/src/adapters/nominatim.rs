//! services/api/src/adapters/nominatim.rs
//!
//! This module contains the adapter for the Nominatim reverse-geocoding service.
//! It implements the `AddressResolver` port from the `core` crate.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    Client, Url,
};
use serde::Deserialize;
use tracing::debug;
use whereami_core::{
    domain::Coordinate,
    ports::{address_or_fallback, AddressResolver, PortError, PortResult},
};

use crate::config::Config;

/// The only field of the `jsonv2` reverse response we care about.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `AddressResolver` port using Nominatim's `/reverse` API.
#[derive(Clone)]
pub struct NominatimAdapter {
    client: Client,
    endpoint: Url,
}

impl NominatimAdapter {
    /// Creates a new `NominatimAdapter` from the service configuration.
    ///
    /// Nominatim's usage policy requires an identifying `User-Agent`.
    pub fn from_config(config: &Config) -> Result<Self, PortError> {
        let endpoint = Url::parse(&config.nominatim_url)
            .map_err(|e| PortError::Unexpected(format!("Invalid Nominatim URL: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.nominatim_user_agent)
                .map_err(|e| PortError::Unexpected(format!("Invalid User-Agent: {}", e)))?,
        );

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.geocoder_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    fn request_url(&self, at: Coordinate) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("format", "jsonv2")
            .append_pair("lat", &at.lat.to_string())
            .append_pair("lon", &at.lon.to_string());
        url
    }
}

/// Extracts the address from a raw response body.
fn parse_reverse_body(body: &str) -> PortResult<String> {
    let parsed: ReverseResponse =
        serde_json::from_str(body).map_err(|e| PortError::Malformed(e.to_string()))?;
    Ok(address_or_fallback(parsed.display_name))
}

//=========================================================================================
// `AddressResolver` Trait Implementation
//=========================================================================================

#[async_trait]
impl AddressResolver for NominatimAdapter {
    async fn reverse_geocode(&self, at: Coordinate) -> PortResult<String> {
        let url = self.request_url(at);
        debug!("Reverse geocoding {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortError::UpstreamStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        parse_reverse_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use whereami_core::domain::FALLBACK_ADDRESS;

    #[test]
    fn parse_display_name() {
        let body = r#"
{
  "place_id": 218466452,
  "licence": "Data © OpenStreetMap contributors, ODbL 1.0. http://osm.org/copyright",
  "osm_type": "way",
  "lat": "3.1390126",
  "lon": "101.6868714",
  "category": "highway",
  "type": "primary",
  "display_name": "Jalan Ampang, Kuala Lumpur, Malaysia",
  "address": {
    "road": "Jalan Ampang",
    "city": "Kuala Lumpur",
    "country": "Malaysia",
    "country_code": "my"
  }
}
"#;
        assert_eq!(
            parse_reverse_body(body).unwrap(),
            "Jalan Ampang, Kuala Lumpur, Malaysia"
        );
    }

    #[test]
    fn parse_missing_display_name() {
        assert_eq!(
            parse_reverse_body(r#"{"error": "Unable to geocode"}"#).unwrap(),
            FALLBACK_ADDRESS
        );
    }

    #[test]
    fn parse_non_json_is_malformed() {
        assert!(matches!(
            parse_reverse_body("<html>rate limited</html>"),
            Err(PortError::Malformed(_))
        ));
    }

    #[test]
    fn request_url_carries_query() {
        let adapter = NominatimAdapter::from_config(&Config::default()).unwrap();
        let url = adapter.request_url(Coordinate {
            lat: 3.139,
            lon: 101.6869,
        });
        assert_eq!(
            url.as_str(),
            "https://nominatim.openstreetmap.org/reverse?format=jsonv2&lat=3.139&lon=101.6869"
        );
    }
}
