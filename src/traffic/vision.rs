//! Image-analysis capability seam.
//!
//! Deployment wires real models behind [`Classifier`] and [`Counter`]; this
//! crate ships random stubs so the rest of the pipeline is exercisable
//! end-to-end without weights.

use crate::traffic::types::TrafficLabel;
use rand::Rng;
use rand::seq::IndexedRandom;
use strum::IntoEnumIterator;

/// Classifies a traffic scene into a label with a confidence in `[0, 1]`.
pub trait Classifier: Send + Sync {
    fn classify(&self, image: &[u8]) -> anyhow::Result<(TrafficLabel, f64)>;
}

/// Counts vehicles in a traffic scene.
pub trait Counter: Send + Sync {
    fn count(&self, image: &[u8]) -> anyhow::Result<u32>;
}

/// Stub classifier: uniform label, confidence 0.78-0.97.
pub struct RandomClassifier;

impl Classifier for RandomClassifier {
    fn classify(&self, _image: &[u8]) -> anyhow::Result<(TrafficLabel, f64)> {
        let labels: Vec<TrafficLabel> = TrafficLabel::iter().collect();
        let mut rng = rand::rng();
        let label = *labels.choose(&mut rng).expect("label set is non-empty");
        let confidence = rng.random_range(0.78..=0.97);
        Ok((label, confidence))
    }
}

/// Stub counter: 8-145 vehicles.
pub struct RandomCounter;

impl Counter for RandomCounter {
    fn count(&self, _image: &[u8]) -> anyhow::Result<u32> {
        Ok(rand::rng().random_range(8..=145))
    }
}

// ─── Derived readouts ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Severity {
    pub level: &'static str,
    pub color: &'static str,
    pub priority: u8,
}

/// Display severity for a classified label.
pub fn severity(label: TrafficLabel) -> Severity {
    match label {
        TrafficLabel::Clear => Severity {
            level: "low",
            color: "green",
            priority: 1,
        },
        TrafficLabel::LightTraffic => Severity {
            level: "low",
            color: "green",
            priority: 2,
        },
        TrafficLabel::HeavyTraffic => Severity {
            level: "high",
            color: "orange",
            priority: 3,
        },
        TrafficLabel::Construction => Severity {
            level: "medium",
            color: "orange",
            priority: 4,
        },
        TrafficLabel::Accident => Severity {
            level: "critical",
            color: "red",
            priority: 5,
        },
        TrafficLabel::Fire => Severity {
            level: "critical",
            color: "red",
            priority: 6,
        },
    }
}

/// Rough per-class split of a total vehicle count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleMix {
    pub total: u32,
    pub cars: u32,
    pub bikes: u32,
    pub trucks: u32,
    pub buses: u32,
}

impl VehicleMix {
    pub fn from_total(total: u32) -> Self {
        let share = |fraction: f64| (f64::from(total) * fraction) as u32;
        Self {
            total,
            cars: share(0.60),
            bikes: share(0.25),
            trucks: share(0.10),
            buses: share(0.05),
        }
    }
}
