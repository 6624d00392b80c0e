use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Routewise.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum RoutewiseError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Generative-text provider ────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Geocoding / routing / IP location ───────────────────────────────
    #[error("geo: {0}")]
    Geo(#[from] GeoError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Generative-text provider errors ────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("provider {provider} authentication failed")]
    Auth { provider: String },

    #[error("provider {provider} returned an empty reply")]
    EmptyReply { provider: String },
}

// ─── Geo collaborator errors ────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("geocoding request failed: {0}")]
    Geocode(String),

    #[error("routing request failed: {0}")]
    Routing(String),

    #[error("ip-location request failed: {0}")]
    IpLocate(String),

    #[error("malformed response from {service}: {message}")]
    Malformed { service: String, message: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, RoutewiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_correctly() {
        let err = RoutewiseError::Config(ConfigError::Validation("bad threshold".into()));
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn llm_request_error_names_provider() {
        let err = RoutewiseError::Llm(LlmError::Request {
            provider: "gemini".into(),
            message: "quota exceeded".into(),
        });
        assert!(err.to_string().contains("gemini"));
        assert!(err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let err: RoutewiseError = anyhow_err.into();
        assert!(err.to_string().contains("something went wrong"));
    }

    #[test]
    fn geo_error_displays_service() {
        let err = RoutewiseError::Geo(GeoError::Malformed {
            service: "nominatim".into(),
            message: "missing lat".into(),
        });
        assert!(err.to_string().contains("nominatim"));
    }
}
