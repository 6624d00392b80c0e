//! Synthetic traffic data, deterministic per time bucket.
//!
//! Every generator derives its RNG seed from the location name and a coarse
//! time bucket (hour for snapshots, minute for heat maps), so repeated calls
//! inside one bucket return identical data and calls in different buckets
//! diverge. This stands in for a caching layer, not for real randomness.

use crate::config::{DensityThresholds, PeakHoursConfig};
use crate::geo::types::Coordinates;
use crate::traffic::heuristics::classify_density;
use crate::traffic::types::{DensityTier, Trend};
use chrono::{DateTime, Local, Timelike, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::hash::{DefaultHasher, Hash, Hasher};
use strum::Display;

/// Locations scanned for the red-zone report.
pub const RED_ZONE_WATCHLIST: [&str; 10] = [
    "Dadar",
    "Ghatkopar",
    "Andheri",
    "Kurla",
    "Bandra",
    "BKC",
    "Worli",
    "Lower Parel",
    "Thane",
    "Mulund",
];

pub fn minute_bucket(now: DateTime<Local>) -> i64 {
    now.timestamp().div_euclid(60)
}

/// Seed over (location, local wall-clock hour), so the bucket boundary lands
/// on the hour the user sees.
fn snapshot_seed(location: &str, now: DateTime<Local>) -> u64 {
    let mut hasher = DefaultHasher::new();
    location.hash(&mut hasher);
    now.format("%Y%m%d%H").to_string().hash(&mut hasher);
    hasher.finish()
}

// ─── Traffic snapshots ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Anomaly {
    #[strum(serialize = "accident")]
    Accident,
    #[strum(serialize = "vehicle stall")]
    VehicleStall,
    #[strum(serialize = "road work")]
    RoadWork,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficSnapshot {
    pub location: String,
    pub vehicle_count: u32,
    pub density: DensityTier,
    pub delay_minutes: u32,
    pub color: &'static str,
    pub anomaly: Option<Anomaly>,
    pub is_peak_hour: bool,
    pub timestamp: String,
}

/// Current-conditions snapshot for a location, stable within one hour.
pub fn snapshot(
    location: &str,
    now: DateTime<Local>,
    thresholds: &DensityThresholds,
    peaks: &PeakHoursConfig,
) -> TrafficSnapshot {
    let mut rng = StdRng::seed_from_u64(snapshot_seed(location, now));
    let is_peak = peaks.is_peak(now.hour());

    let vehicle_count: u32 = if is_peak {
        rng.random_range(80..=180)
    } else {
        rng.random_range(20..=80)
    };

    let density = classify_density(vehicle_count, thresholds);
    let delay_minutes: u32 = match density {
        DensityTier::Low => rng.random_range(2..=8),
        DensityTier::Medium => rng.random_range(10..=20),
        DensityTier::High => rng.random_range(22..=45),
    };

    let anomaly = if rng.random::<f64>() < 0.05 {
        Some(match rng.random_range(0..3) {
            0 => Anomaly::Accident,
            1 => Anomaly::VehicleStall,
            _ => Anomaly::RoadWork,
        })
    } else {
        None
    };

    TrafficSnapshot {
        location: location.to_string(),
        vehicle_count,
        density,
        delay_minutes,
        color: density.color(),
        anomaly,
        is_peak_hour: is_peak,
        timestamp: now.format("%I:%M %p").to_string(),
    }
}

// ─── Predictions ────────────────────────────────────────────────────────────

/// Expected near-future density; one notch above High exists because an
/// already-High zone entering a peak window keeps degrading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum ExpectedTier {
    #[strum(serialize = "Low")]
    Low,
    #[strum(serialize = "Medium")]
    Medium,
    #[strum(serialize = "High")]
    High,
    #[strum(serialize = "Very High")]
    VeryHigh,
}

impl From<DensityTier> for ExpectedTier {
    fn from(tier: DensityTier) -> Self {
        match tier {
            DensityTier::Low => ExpectedTier::Low,
            DensityTier::Medium => ExpectedTier::Medium,
            DensityTier::High => ExpectedTier::High,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficPrediction {
    pub location: String,
    pub current_density: DensityTier,
    pub trend: Trend,
    pub expected_density: ExpectedTier,
    pub minutes_ahead: u32,
}

/// Short-term forecast: compares peak-window membership now vs. the horizon
/// hour and bumps or relaxes the expected tier accordingly.
pub fn prediction(
    location: &str,
    now: DateTime<Local>,
    minutes_ahead: u32,
    thresholds: &DensityThresholds,
    peaks: &PeakHoursConfig,
) -> TrafficPrediction {
    let current = snapshot(location, now, thresholds, peaks);
    let future_hour = (now.hour() + minutes_ahead / 60) % 24;

    let entering_peak = !current.is_peak_hour && peaks.is_peak(future_hour);
    let exiting_peak = current.is_peak_hour && !peaks.is_peak(future_hour);

    let (trend, expected_density) = if entering_peak {
        let expected = if current.density == DensityTier::High {
            ExpectedTier::VeryHigh
        } else {
            ExpectedTier::High
        };
        (Trend::Increasing, expected)
    } else if exiting_peak {
        let expected = if current.density == DensityTier::High {
            ExpectedTier::Medium
        } else {
            ExpectedTier::Low
        };
        (Trend::Decreasing, expected)
    } else {
        (Trend::Stable, current.density.into())
    };

    TrafficPrediction {
        location: location.to_string(),
        current_density: current.density,
        trend,
        expected_density,
        minutes_ahead,
    }
}

// ─── Historical summaries ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalSummary {
    pub location: String,
    pub day: String,
    pub morning_peak: &'static str,
    pub evening_peak: &'static str,
    pub busiest_hour: &'static str,
    pub average_peak_vehicles: u32,
    pub average_off_peak_vehicles: u32,
    pub recommended_travel_times: [&'static str; 3],
}

/// Typical-pattern summary for a weekday. Averages are resampled per call;
/// the shape of the day (peaks, busiest hour) is fixed.
pub fn historical_summary(location: &str, day: Weekday) -> HistoricalSummary {
    let mut rng = rand::rng();
    let weekday = !matches!(day, Weekday::Sat | Weekday::Sun);

    HistoricalSummary {
        location: location.to_string(),
        day: crate::util::time::day_name(day).to_string(),
        morning_peak: "8:30 AM - 10:30 AM",
        evening_peak: "6:00 PM - 8:30 PM",
        busiest_hour: if weekday { "9:00 AM" } else { "11:00 AM" },
        average_peak_vehicles: rng.random_range(120..=160),
        average_off_peak_vehicles: rng.random_range(30..=60),
        recommended_travel_times: ["Before 7:30 AM", "11:00 AM - 4:00 PM", "After 9:30 PM"],
    }
}

// ─── Red zones ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedZone {
    pub location: &'static str,
    pub vehicle_count: u32,
    pub delay_minutes: u32,
}

/// Watchlist locations currently at High density. May be empty, callers
/// phrase the all-clear themselves.
pub fn red_zones(
    now: DateTime<Local>,
    thresholds: &DensityThresholds,
    peaks: &PeakHoursConfig,
) -> Vec<RedZone> {
    RED_ZONE_WATCHLIST
        .iter()
        .filter_map(|location| {
            let snap = snapshot(location, now, thresholds, peaks);
            (snap.density == DensityTier::High).then_some(RedZone {
                location,
                vehicle_count: snap.vehicle_count,
                delay_minutes: snap.delay_minutes,
            })
        })
        .collect()
}

// ─── Heat map ───────────────────────────────────────────────────────────────

pub const HEATMAP_POINT_COUNT: usize = 40;
pub const HEATMAP_SPREAD_DEG: f64 = 0.05;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatPoint {
    pub coords: Coordinates,
    pub intensity: f64,
    pub tier: DensityTier,
}

/// Point cloud around a center, stable within one minute bucket. Intensity
/// decays linearly with offset distance and floors at 0.3.
pub fn heatmap_points(center: Coordinates, bucket: i64) -> Vec<HeatPoint> {
    #[allow(clippy::cast_sign_loss)]
    let mut rng = StdRng::seed_from_u64(bucket as u64);

    (0..HEATMAP_POINT_COUNT)
        .map(|_| {
            let lat_offset: f64 = rng.random_range(-HEATMAP_SPREAD_DEG..=HEATMAP_SPREAD_DEG);
            let lon_offset: f64 = rng.random_range(-HEATMAP_SPREAD_DEG..=HEATMAP_SPREAD_DEG);

            let distance = (lat_offset.powi(2) + lon_offset.powi(2)).sqrt();
            let intensity = (1.0 - distance * 12.0).max(0.3);

            let tier = if intensity > 0.7 {
                DensityTier::High
            } else if intensity > 0.5 {
                DensityTier::Medium
            } else {
                DensityTier::Low
            };

            HeatPoint {
                coords: Coordinates::new(center.lat + lat_offset, center.lon + lon_offset),
                intensity,
                tier,
            }
        })
        .collect()
}

/// One-minute cache over [`heatmap_points`]: the point cloud regenerates only
/// when the minute bucket ticks over or the center moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapCache {
    points: Vec<HeatPoint>,
    bucket: i64,
    center: Coordinates,
}

impl HeatmapCache {
    pub fn generate(center: Coordinates, now: DateTime<Local>) -> Self {
        let bucket = minute_bucket(now);
        Self {
            points: heatmap_points(center, bucket),
            bucket,
            center,
        }
    }

    /// Check-timestamp-then-regenerate; single-threaded by design, callers
    /// introducing concurrency must serialize access.
    pub fn refresh(&mut self, center: Coordinates, now: DateTime<Local>) -> &[HeatPoint] {
        let bucket = minute_bucket(now);
        if bucket != self.bucket || center != self.center {
            *self = Self::generate(center, now);
        }
        &self.points
    }

    pub fn points(&self) -> &[HeatPoint] {
        &self.points
    }

    /// Seconds until the next minute tick invalidates this cache.
    pub fn seconds_until_refresh(&self, now: DateTime<Local>) -> i64 {
        60 - now.timestamp().rem_euclid(60)
    }
}
