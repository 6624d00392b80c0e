pub mod heuristics;
pub mod synthetic;
pub mod types;
pub mod vision;

pub use types::{DensityTier, TrafficLabel, Trend, Weather};
