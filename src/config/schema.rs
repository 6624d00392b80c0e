use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Typed application configuration.
///
/// Loaded from `~/.routewise/config.toml`; every field has a serde default so
/// a missing or partial file still yields a fully populated struct. The
/// Gemini API key may also come from the `GEMINI_API_KEY` or `GOOGLE_API_KEY`
/// environment variables (resolved at provider construction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// External-call timeout in seconds (applies to all HTTP collaborators).
    #[serde(default = "default_api_timeout_secs")]
    pub api_timeout_secs: u64,

    /// Best-effort voice announcements for reroute alerts.
    #[serde(default)]
    pub voice_enabled: bool,

    #[serde(default)]
    pub endpoints: EndpointsConfig,

    #[serde(default)]
    pub thresholds: DensityThresholds,

    #[serde(default)]
    pub peak_hours: PeakHoursConfig,

    #[serde(default)]
    pub default_location: DefaultLocation,
}

fn default_model() -> String {
    "gemini-pro".into()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_api_timeout_secs() -> u64 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            api_timeout_secs: default_api_timeout_secs(),
            voice_enabled: false,
            endpoints: EndpointsConfig::default(),
            thresholds: DensityThresholds::default(),
            peak_hours: PeakHoursConfig::default(),
            default_location: DefaultLocation::default(),
        }
    }
}

impl Config {
    /// Load config from `~/.routewise/config.toml`, creating the file with
    /// defaults on first run.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let Some(path) = Self::config_file_path() else {
            // No resolvable home directory; run on in-memory defaults.
            return Ok(Self::default());
        };

        if !path.exists() {
            let config = Self {
                config_path: path.clone(),
                ..Self::default()
            };
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| ConfigError::Load(e.to_string()))?;
            fs::write(&path, rendered)?;
            return Ok(config);
        }

        let raw = fs::read_to_string(&path)?;
        let mut config: Self =
            toml::from_str(&raw).map_err(|e| ConfigError::Load(e.to_string()))?;
        config.config_path = path;
        config.validate()?;
        Ok(config)
    }

    fn config_file_path() -> Option<PathBuf> {
        UserDirs::new().map(|u| u.home_dir().join(".routewise").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thresholds.low >= self.thresholds.medium {
            return Err(ConfigError::Validation(format!(
                "density thresholds must be ordered: low {} >= medium {}",
                self.thresholds.low, self.thresholds.medium
            )));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Validation(format!(
                "temperature {} out of range 0.0-2.0",
                self.temperature
            )));
        }
        for window in [&self.peak_hours.morning, &self.peak_hours.evening] {
            if window.start > 23 || window.end > 23 || window.start > window.end {
                return Err(ConfigError::Validation(format!(
                    "invalid peak window {}-{}",
                    window.start, window.end
                )));
            }
        }
        Ok(())
    }
}

// ─── External service endpoints ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    #[serde(default = "default_nominatim")]
    pub nominatim: String,
    #[serde(default = "default_osrm")]
    pub osrm: String,
    #[serde(default = "default_ip_api")]
    pub ip_api: String,
}

fn default_nominatim() -> String {
    "https://nominatim.openstreetmap.org".into()
}

fn default_osrm() -> String {
    "https://router.project-osrm.org".into()
}

fn default_ip_api() -> String {
    "http://ip-api.com/json/".into()
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            nominatim: default_nominatim(),
            osrm: default_osrm(),
            ip_api: default_ip_api(),
        }
    }
}

// ─── Traffic density thresholds ─────────────────────────────────────────────

/// Vehicle-count cutoffs between density tiers: below `low` is Low, below
/// `medium` is Medium, anything else is High.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DensityThresholds {
    #[serde(default = "default_low_threshold")]
    pub low: u32,
    #[serde(default = "default_medium_threshold")]
    pub medium: u32,
}

fn default_low_threshold() -> u32 {
    30
}

fn default_medium_threshold() -> u32 {
    80
}

impl Default for DensityThresholds {
    fn default() -> Self {
        Self {
            low: default_low_threshold(),
            medium: default_medium_threshold(),
        }
    }
}

// ─── Peak hour windows ──────────────────────────────────────────────────────

/// Inclusive hour range, 24-hour clock.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeakWindow {
    pub start: u32,
    pub end: u32,
}

impl PeakWindow {
    pub fn contains(&self, hour: u32) -> bool {
        self.start <= hour && hour <= self.end
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeakHoursConfig {
    #[serde(default = "default_morning_peak")]
    pub morning: PeakWindow,
    #[serde(default = "default_evening_peak")]
    pub evening: PeakWindow,
}

fn default_morning_peak() -> PeakWindow {
    PeakWindow { start: 8, end: 11 }
}

fn default_evening_peak() -> PeakWindow {
    PeakWindow { start: 17, end: 21 }
}

impl Default for PeakHoursConfig {
    fn default() -> Self {
        Self {
            morning: default_morning_peak(),
            evening: default_evening_peak(),
        }
    }
}

impl PeakHoursConfig {
    /// Whether `hour` falls inside either configured peak window.
    pub fn is_peak(&self, hour: u32) -> bool {
        self.morning.contains(hour) || self.evening.contains(hour)
    }
}

// ─── Default map center ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultLocation {
    #[serde(default = "default_lat")]
    pub lat: f64,
    #[serde(default = "default_lon")]
    pub lon: f64,
    #[serde(default = "default_location_name")]
    pub name: String,
}

fn default_lat() -> f64 {
    19.0760
}

fn default_lon() -> f64 {
    72.8777
}

fn default_location_name() -> String {
    "Mumbai, India".into()
}

impl Default for DefaultLocation {
    fn default() -> Self {
        Self {
            lat: default_lat(),
            lon: default_lon(),
            name: default_location_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let config = Config::default();
        assert_eq!(config.thresholds.low, 30);
        assert_eq!(config.thresholds.medium, 80);
        assert_eq!(config.peak_hours.morning.start, 8);
        assert_eq!(config.peak_hours.morning.end, 11);
        assert_eq!(config.peak_hours.evening.start, 17);
        assert_eq!(config.peak_hours.evening.end, 21);
        assert_eq!(config.api_timeout_secs, 15);
        assert_eq!(config.default_location.name, "Mumbai, India");
    }

    #[test]
    fn peak_windows_are_two_sided() {
        let peaks = PeakHoursConfig::default();
        assert!(peaks.is_peak(8));
        assert!(peaks.is_peak(11));
        assert!(!peaks.is_peak(12));
        assert!(peaks.is_peak(17));
        assert!(peaks.is_peak(21));
        // Both window edges must bound the check, late night is off-peak.
        assert!(!peaks.is_peak(22));
        assert!(!peaks.is_peak(3));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("api_key = \"abc\"").expect("parse");
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.model, "gemini-pro");
        assert_eq!(config.thresholds.medium, 80);
    }

    #[test]
    fn unordered_thresholds_fail_validation() {
        let config = Config {
            thresholds: DensityThresholds { low: 90, medium: 80 },
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
