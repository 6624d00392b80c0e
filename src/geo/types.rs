use serde::{Deserialize, Serialize};

/// WGS84 point, latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// Geometric midpoint, good enough at city scale.
    pub fn midpoint(&self, other: &Coordinates) -> Coordinates {
        Coordinates {
            lat: (self.lat + other.lat) / 2.0,
            lon: (self.lon + other.lon) / 2.0,
        }
    }
}

/// A geocoded place: coordinates plus the resolver's canonical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub coords: Coordinates,
    pub display_name: String,
}

/// Approximate location derived from the caller's network address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpLocation {
    pub coords: Coordinates,
    pub city: String,
    pub region: String,
    pub country: String,
}

impl IpLocation {
    /// Human-readable label; coordinates are never shown to the user.
    pub fn display_name(&self) -> String {
        format!("{}, {}, {}", self.city, self.region, self.country)
    }

    pub fn into_place(self) -> Place {
        let display_name = self.display_name();
        Place {
            coords: self.coords,
            display_name,
        }
    }
}

/// One driving path from the routing collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub path: Vec<Coordinates>,
    pub distance_km: f64,
    pub duration_min: f64,
    /// Resolver-assigned: the first returned route, not the shortest.
    pub is_primary: bool,
}

/// Non-empty set of routes; index 0 is the primary by convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteSet {
    routes: Vec<Route>,
}

impl RouteSet {
    /// Returns `None` for an empty list so a `RouteSet` is never empty.
    pub fn new(routes: Vec<Route>) -> Option<Self> {
        if routes.is_empty() {
            None
        } else {
            Some(Self { routes })
        }
    }

    pub fn primary(&self) -> &Route {
        &self.routes[0]
    }

    pub fn alternates(&self) -> &[Route] {
        &self.routes[1..]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Traffic-adjusted metrics derived from a route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMetrics {
    pub actual_duration_min: f64,
    pub estimated_fuel_l: f64,
    /// 0-100 score combining length, time, and congestion.
    pub difficulty: f64,
}

impl RouteMetrics {
    /// `traffic_factor` scales duration: 1.0 = free flow, above = congested.
    pub fn for_route(route: &Route, traffic_factor: f64) -> Self {
        let base_score =
            (route.distance_km / 50.0 * 50.0 + route.duration_min / 60.0 * 50.0).min(100.0);
        Self {
            actual_duration_min: route.duration_min * traffic_factor,
            estimated_fuel_l: route.distance_km * 0.08,
            difficulty: (base_score * traffic_factor).min(100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_route(primary: bool) -> Route {
        Route {
            path: vec![Coordinates::new(19.0, 72.8), Coordinates::new(19.1, 72.9)],
            distance_km: 12.5,
            duration_min: 30.0,
            is_primary: primary,
        }
    }

    #[test]
    fn coordinates_validation() {
        assert!(Coordinates::new(19.07, 72.87).is_valid());
        assert!(Coordinates::new(-90.0, 180.0).is_valid());
        assert!(!Coordinates::new(91.0, 0.0).is_valid());
        assert!(!Coordinates::new(0.0, -181.0).is_valid());
    }

    #[test]
    fn midpoint_is_average() {
        let mid = Coordinates::new(10.0, 20.0).midpoint(&Coordinates::new(20.0, 40.0));
        assert!((mid.lat - 15.0).abs() < f64::EPSILON);
        assert!((mid.lon - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn route_set_rejects_empty() {
        assert!(RouteSet::new(vec![]).is_none());
        let set = RouteSet::new(vec![sample_route(true)]).expect("non-empty");
        assert!(set.primary().is_primary);
        assert!(set.alternates().is_empty());
    }

    #[test]
    fn route_metrics_scale_with_traffic() {
        let route = sample_route(true);
        let normal = RouteMetrics::for_route(&route, 1.0);
        let jammed = RouteMetrics::for_route(&route, 1.8);
        assert!((normal.actual_duration_min - 30.0).abs() < f64::EPSILON);
        assert!(jammed.actual_duration_min > normal.actual_duration_min);
        assert!(jammed.difficulty >= normal.difficulty);
        assert!((normal.estimated_fuel_l - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ip_location_display_hides_coordinates() {
        let loc = IpLocation {
            coords: Coordinates::new(19.07, 72.87),
            city: "Mumbai".into(),
            region: "Maharashtra".into(),
            country: "India".into(),
        };
        let shown = loc.display_name();
        assert_eq!(shown, "Mumbai, Maharashtra, India");
        assert!(!shown.contains("19.07"));
    }
}
