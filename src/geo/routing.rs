//! Driving-route resolution via the OSRM collaborator.

use crate::config::Config;
use crate::error::GeoError;
use crate::geo::types::{Coordinates, Route, RouteSet};
use crate::providers::build_collaborator_client;
use reqwest::Client;
use serde::Deserialize;

pub struct RoutingClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    /// Meters.
    distance: f64,
    /// Seconds.
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[lon, lat]`.
    coordinates: Vec<[f64; 2]>,
}

impl RoutingClient {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.endpoints.osrm.clone(),
            client: build_collaborator_client(config.api_timeout_secs),
        }
    }

    /// Override the endpoint, used by tests against a mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch one or more driving routes between two points. The first route
    /// returned by OSRM is marked primary. A non-`Ok` routing code yields
    /// `None` rather than an error: the collaborator answered, it just found
    /// no route.
    pub async fn fetch_routes(
        &self,
        start: Coordinates,
        end: Coordinates,
        alternatives: bool,
    ) -> Result<Option<RouteSet>, GeoError> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url, start.lon, start.lat, end.lon, end.lat
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("alternatives", if alternatives { "true" } else { "false" }),
            ])
            .send()
            .await
            .map_err(|e| GeoError::Routing(e.to_string()))?
            .error_for_status()
            .map_err(|e| GeoError::Routing(e.to_string()))?;

        let parsed: OsrmResponse = response.json().await.map_err(|e| GeoError::Malformed {
            service: "osrm".into(),
            message: e.to_string(),
        })?;

        if parsed.code != "Ok" {
            tracing::debug!(code = %parsed.code, "osrm returned no route");
            return Ok(None);
        }

        let routes: Vec<Route> = parsed
            .routes
            .into_iter()
            .enumerate()
            .map(|(i, route)| Route {
                path: route
                    .geometry
                    .coordinates
                    .into_iter()
                    .map(|[lon, lat]| Coordinates::new(lat, lon))
                    .collect(),
                distance_km: route.distance / 1000.0,
                duration_min: route.duration / 60.0,
                is_primary: i == 0,
            })
            .collect();

        Ok(RouteSet::new(routes))
    }
}
