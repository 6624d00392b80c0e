//! Approximate self-location via the ip-api collaborator.

use crate::config::Config;
use crate::error::GeoError;
use crate::geo::types::{Coordinates, IpLocation, Place};
use crate::providers::build_collaborator_client;
use reqwest::Client;
use serde::Deserialize;

pub struct IpLocateClient {
    url: String,
    client: Client,
    fallback: Place,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

impl IpLocateClient {
    pub fn new(config: &Config) -> Self {
        Self {
            url: config.endpoints.ip_api.clone(),
            client: build_collaborator_client(config.api_timeout_secs),
            fallback: Place {
                coords: Coordinates::new(config.default_location.lat, config.default_location.lon),
                display_name: config.default_location.name.clone(),
            },
        }
    }

    /// Override the endpoint, used by tests against a mock server.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Ask the collaborator where this machine appears to be. `None` when it
    /// answers with a non-success status.
    pub async fn locate(&self) -> Result<Option<IpLocation>, GeoError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeoError::IpLocate(e.to_string()))?
            .error_for_status()
            .map_err(|e| GeoError::IpLocate(e.to_string()))?;

        let parsed: IpApiResponse = response.json().await.map_err(|e| GeoError::Malformed {
            service: "ip-api".into(),
            message: e.to_string(),
        })?;

        if parsed.status != "success" {
            return Ok(None);
        }

        match (parsed.lat, parsed.lon) {
            (Some(lat), Some(lon)) => Ok(Some(IpLocation {
                coords: Coordinates::new(lat, lon),
                city: parsed.city.unwrap_or_default(),
                region: parsed.region_name.unwrap_or_default(),
                country: parsed.country.unwrap_or_default(),
            })),
            _ => Err(GeoError::Malformed {
                service: "ip-api".into(),
                message: "success status without coordinates".into(),
            }),
        }
    }

    /// Locate with graceful degradation: a failed or refused lookup falls
    /// back to the configured default location.
    pub async fn locate_or_default(&self) -> Place {
        match self.locate().await {
            Ok(Some(location)) => location.into_place(),
            Ok(None) => {
                tracing::debug!("ip-api refused lookup, using default location");
                self.fallback.clone()
            }
            Err(e) => {
                tracing::warn!(error = %e, "ip location failed, using default location");
                self.fallback.clone()
            }
        }
    }
}
