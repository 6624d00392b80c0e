//! Pure traffic-condition heuristics: clear-time estimation, density
//! classification, and the reroute decision. All thresholds come from
//! configuration so deployments can retune them without a rebuild.

use crate::config::DensityThresholds;
use crate::traffic::types::{DensityTier, TrafficLabel, Weather};

/// Estimated minutes until a scene clears.
///
/// Base cost is 15 seconds per vehicle, scaled by condition severity, a 1.6x
/// peak-hour surcharge, and weather. The result is truncated, so zero
/// vehicles always estimate zero.
pub fn estimate_clear_time(
    vehicle_count: u32,
    label: TrafficLabel,
    peak_hour: bool,
    weather: Weather,
) -> u32 {
    let mut minutes = f64::from(vehicle_count) * 0.25;
    minutes *= label.clear_time_factor();
    if peak_hour {
        minutes *= 1.6;
    }
    minutes *= weather.clear_time_factor();
    minutes as u32
}

/// Bucket a vehicle count against the configured tier cutoffs.
pub fn classify_density(vehicle_count: u32, thresholds: &DensityThresholds) -> DensityTier {
    if vehicle_count < thresholds.low {
        DensityTier::Low
    } else if vehicle_count < thresholds.medium {
        DensityTier::Medium
    } else {
        DensityTier::High
    }
}

/// Whether the primary route should be abandoned: a critical or heavy
/// condition, or raw volume past the medium threshold.
pub fn should_reroute(
    label: TrafficLabel,
    vehicle_count: u32,
    thresholds: &DensityThresholds,
) -> bool {
    if label.is_critical() || label == TrafficLabel::HeavyTraffic {
        return true;
    }
    vehicle_count > thresholds.medium
}

// ─── Condition analysis ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.85 {
            ConfidenceBand::High
        } else if confidence > 0.70 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

/// Full condition readout for one analyzed scene.
#[derive(Debug, Clone)]
pub struct ConditionAnalysis {
    pub is_critical: bool,
    pub is_heavy: bool,
    pub is_clear: bool,
    pub density: DensityTier,
    pub recommendation: String,
    pub priority: Priority,
    pub confidence: ConfidenceBand,
}

pub fn analyze_condition(
    label: TrafficLabel,
    vehicle_count: u32,
    confidence: f64,
    thresholds: &DensityThresholds,
) -> ConditionAnalysis {
    let is_critical = label.is_critical();
    let is_heavy = label == TrafficLabel::HeavyTraffic;
    let is_clear = matches!(label, TrafficLabel::Clear | TrafficLabel::LightTraffic);
    let density = classify_density(vehicle_count, thresholds);

    let (recommendation, priority) = if is_critical {
        (
            format!("AVOID THIS ROUTE! {label} detected. Find alternate route immediately."),
            Priority::Critical,
        )
    } else if is_heavy {
        (
            "Heavy traffic ahead. Consider taking an alternate route if available.".to_string(),
            Priority::High,
        )
    } else if density == DensityTier::High {
        (
            "High vehicle density. Expect delays. Alternate route recommended.".to_string(),
            Priority::Medium,
        )
    } else {
        ("Route is clear. Safe to proceed.".to_string(), Priority::Low)
    };

    ConditionAnalysis {
        is_critical,
        is_heavy,
        is_clear,
        density,
        recommendation,
        priority,
        confidence: ConfidenceBand::from_confidence(confidence),
    }
}

/// Templated one-line alert for a condition at a location.
pub fn condition_alert(label: TrafficLabel, location: &str) -> String {
    match label {
        TrafficLabel::Accident => {
            format!("ACCIDENT reported at {location}! Seek alternate route immediately.")
        }
        TrafficLabel::Fire => {
            format!("FIRE incident at {location}! Route blocked. Emergency services en route.")
        }
        TrafficLabel::HeavyTraffic => {
            format!("HEAVY TRAFFIC at {location}. Significant delays expected.")
        }
        TrafficLabel::Construction => {
            format!("Construction work at {location}. Lane closures possible.")
        }
        TrafficLabel::LightTraffic => {
            format!("Light traffic at {location}. Minor delays possible.")
        }
        TrafficLabel::Clear => format!("All clear at {location}. No issues detected."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> DensityThresholds {
        DensityThresholds { low: 30, medium: 80 }
    }

    #[test]
    fn clear_time_zero_vehicles_is_zero() {
        assert_eq!(
            estimate_clear_time(0, TrafficLabel::Clear, false, Weather::Clear),
            0
        );
    }

    #[test]
    fn clear_time_monotone_in_count() {
        let mut last = 0;
        for count in (0..200).step_by(10) {
            let estimate =
                estimate_clear_time(count, TrafficLabel::HeavyTraffic, true, Weather::Rain);
            assert!(estimate >= last, "not monotone at count {count}");
            last = estimate;
        }
    }

    #[test]
    fn clear_time_applies_all_factors() {
        // 100 * 0.25 = 25, * 4.5 (fire) = 112.5, * 1.6 (peak) = 180,
        // * 2.0 (snow) = 360
        assert_eq!(
            estimate_clear_time(100, TrafficLabel::Fire, true, Weather::Snow),
            360
        );
    }

    #[test]
    fn density_boundaries() {
        let t = thresholds();
        assert_eq!(classify_density(29, &t), DensityTier::Low);
        assert_eq!(classify_density(30, &t), DensityTier::Medium);
        assert_eq!(classify_density(79, &t), DensityTier::Medium);
        assert_eq!(classify_density(80, &t), DensityTier::High);
    }

    #[test]
    fn density_is_monotone_non_decreasing() {
        let t = thresholds();
        let mut last = DensityTier::Low;
        for count in 0..200 {
            let tier = classify_density(count, &t);
            assert!(tier >= last);
            last = tier;
        }
    }

    #[test]
    fn reroute_on_fire_regardless_of_count() {
        let t = thresholds();
        assert!(should_reroute(TrafficLabel::Fire, 0, &t));
    }

    #[test]
    fn reroute_on_count_alone() {
        let t = thresholds();
        assert!(should_reroute(TrafficLabel::Clear, 81, &t));
        assert!(!should_reroute(TrafficLabel::Clear, 80, &t));
    }

    #[test]
    fn custom_thresholds_shift_boundaries() {
        let t = DensityThresholds { low: 10, medium: 20 };
        assert_eq!(classify_density(15, &t), DensityTier::Medium);
        assert!(should_reroute(TrafficLabel::Clear, 21, &t));
    }

    #[test]
    fn analysis_priorities() {
        let t = thresholds();
        let critical = analyze_condition(TrafficLabel::Accident, 10, 0.9, &t);
        assert!(critical.is_critical);
        assert_eq!(critical.priority, Priority::Critical);

        let clear = analyze_condition(TrafficLabel::Clear, 10, 0.6, &t);
        assert!(clear.is_clear);
        assert_eq!(clear.priority, Priority::Low);
        assert_eq!(clear.confidence, ConfidenceBand::Low);
    }

    #[test]
    fn confidence_bands() {
        assert_eq!(
            ConfidenceBand::from_confidence(0.86),
            ConfidenceBand::High
        );
        assert_eq!(
            ConfidenceBand::from_confidence(0.75),
            ConfidenceBand::Medium
        );
        assert_eq!(ConfidenceBand::from_confidence(0.5), ConfidenceBand::Low);
    }

    #[test]
    fn alert_templates_mention_location() {
        let alert = condition_alert(TrafficLabel::Accident, "Dadar");
        assert!(alert.contains("ACCIDENT"));
        assert!(alert.contains("Dadar"));
    }
}
