pub mod geocode;
pub mod locate;
pub mod routing;
pub mod types;

pub use geocode::GeocodeClient;
pub use locate::IpLocateClient;
pub use routing::RoutingClient;
pub use types::{Coordinates, IpLocation, Place, Route, RouteMetrics, RouteSet};
