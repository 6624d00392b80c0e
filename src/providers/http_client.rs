use reqwest::Client;
use std::time::Duration;

/// Shared HTTP client builder for every external collaborator (Nominatim,
/// OSRM, ip-api, Gemini). One request timeout governs them all; a failed
/// builder falls back to the default client rather than aborting startup.
pub fn build_collaborator_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .user_agent(concat!("routewise/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}
