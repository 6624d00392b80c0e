use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Closed set of conditions the image classifier can emit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
pub enum TrafficLabel {
    #[strum(serialize = "Clear")]
    Clear,
    #[strum(serialize = "Light Traffic")]
    LightTraffic,
    #[strum(serialize = "Heavy Traffic")]
    HeavyTraffic,
    #[strum(serialize = "Accident")]
    Accident,
    #[strum(serialize = "Fire")]
    Fire,
    #[strum(serialize = "Construction")]
    Construction,
}

impl TrafficLabel {
    /// Accident and Fire demand immediate rerouting regardless of volume.
    pub fn is_critical(&self) -> bool {
        matches!(self, TrafficLabel::Accident | TrafficLabel::Fire)
    }

    /// Clear-time severity multiplier for this condition.
    pub fn clear_time_factor(&self) -> f64 {
        match self {
            TrafficLabel::Clear => 0.5,
            TrafficLabel::LightTraffic => 1.0,
            TrafficLabel::HeavyTraffic => 2.2,
            TrafficLabel::Accident => 3.8,
            TrafficLabel::Fire => 4.5,
            TrafficLabel::Construction => 2.8,
        }
    }
}

/// Coarse vehicle-count bucket used for display and reroute decisions.
/// Ordered so density comparisons read naturally.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum DensityTier {
    Low,
    Medium,
    High,
}

impl DensityTier {
    pub fn color(&self) -> &'static str {
        match self {
            DensityTier::Low => "green",
            DensityTier::Medium => "orange",
            DensityTier::High => "red",
        }
    }
}

/// Weather conditions that slow down traffic clearance.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize, Default,
)]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Fog,
    Snow,
}

impl Weather {
    pub fn clear_time_factor(&self) -> f64 {
        match self {
            Weather::Clear => 1.0,
            Weather::Rain => 1.5,
            Weather::Fog => 1.7,
            Weather::Snow => 2.0,
        }
    }
}

/// Short-term traffic direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Trend {
    #[strum(serialize = "increasing")]
    Increasing,
    #[strum(serialize = "decreasing")]
    Decreasing,
    #[strum(serialize = "stable")]
    Stable,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn labels_round_trip_display_strings() {
        assert_eq!(TrafficLabel::HeavyTraffic.to_string(), "Heavy Traffic");
        assert_eq!(
            TrafficLabel::from_str("Heavy Traffic").expect("parse"),
            TrafficLabel::HeavyTraffic
        );
    }

    #[test]
    fn critical_labels() {
        assert!(TrafficLabel::Accident.is_critical());
        assert!(TrafficLabel::Fire.is_critical());
        assert!(!TrafficLabel::HeavyTraffic.is_critical());
        assert!(!TrafficLabel::Clear.is_critical());
    }

    #[test]
    fn density_tiers_are_ordered() {
        assert!(DensityTier::Low < DensityTier::Medium);
        assert!(DensityTier::Medium < DensityTier::High);
        assert_eq!(DensityTier::High.color(), "red");
    }
}
