//! Free-text place resolution via the Nominatim collaborator.

use crate::config::Config;
use crate::error::GeoError;
use crate::geo::types::{Coordinates, Place};
use crate::providers::build_collaborator_client;
use reqwest::Client;
use serde::Deserialize;

pub struct GeocodeClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
}

impl GeocodeClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.endpoints.nominatim.clone(),
            client: build_collaborator_client(config.api_timeout_secs),
        }
    }

    /// Override the endpoint, used by tests against a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve a free-text query to its first match, or `None` if the
    /// collaborator knows no such place.
    pub async fn geocode(&self, query: &str) -> Result<Option<Place>, GeoError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeoError::Geocode(e.to_string()))?
            .error_for_status()
            .map_err(|e| GeoError::Geocode(e.to_string()))?;

        let hits: Vec<SearchHit> = response
            .json()
            .await
            .map_err(|e| GeoError::Malformed {
                service: "nominatim".into(),
                message: e.to_string(),
            })?;

        let Some(hit) = hits.into_iter().next() else {
            return Ok(None);
        };

        let lat = hit.lat.parse::<f64>().map_err(|e| GeoError::Malformed {
            service: "nominatim".into(),
            message: format!("lat: {e}"),
        })?;
        let lon = hit.lon.parse::<f64>().map_err(|e| GeoError::Malformed {
            service: "nominatim".into(),
            message: format!("lon: {e}"),
        })?;

        Ok(Some(Place {
            coords: Coordinates::new(lat, lon),
            display_name: hit.display_name,
        }))
    }

    /// Resolve coordinates back to a canonical display name.
    pub async fn reverse(&self, coords: Coordinates) -> Result<Option<String>, GeoError> {
        let url = format!("{}/reverse", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await
            .map_err(|e| GeoError::Geocode(e.to_string()))?
            .error_for_status()
            .map_err(|e| GeoError::Geocode(e.to_string()))?;

        let parsed: ReverseResponse = response.json().await.map_err(|e| GeoError::Malformed {
            service: "nominatim".into(),
            message: e.to_string(),
        })?;

        Ok(parsed.display_name)
    }
}
