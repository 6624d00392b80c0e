pub mod schema;

pub use schema::{
    Config, DefaultLocation, DensityThresholds, EndpointsConfig, PeakHoursConfig, PeakWindow,
};
