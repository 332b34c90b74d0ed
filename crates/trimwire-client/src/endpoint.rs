// crates/trimwire-client/src/endpoint.rs
//
// Where the processing service lives. Resolution order:
//   1. the TRIMWIRE_SERVER_URL environment variable
//   2. the service's stock dev address, http://127.0.0.1:5000
//
// Read once at startup; there is no config file (everything is
// session-only).

/// Environment variable naming the service base URL.
pub const SERVER_URL_VAR: &str = "TRIMWIRE_SERVER_URL";

/// Stock address of a locally run processing service.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    base_url: String,
}

impl ServerConfig {
    /// Resolve from the environment, falling back to the stock address.
    pub fn from_env() -> Self {
        let base = std::env::var(SERVER_URL_VAR).ok();
        let config = Self::resolve(base.as_deref());
        log::info!("processing service at {}", config.base_url);
        config
    }

    /// Fixed base URL, bypassing the environment. Used by tests and by any
    /// embedder that manages configuration itself.
    pub fn with_base_url(base: &str) -> Self {
        Self::resolve(Some(base))
    }

    /// Blank values fall back to the default; trailing slashes are stripped
    /// so route joins cannot produce `//`.
    fn resolve(base: Option<&str>) -> Self {
        let trimmed = base.map(str::trim).filter(|b| !b.is_empty());
        let base_url = trimmed
            .unwrap_or(DEFAULT_SERVER_URL)
            .trim_end_matches('/')
            .to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The multipart processing endpoint.
    pub fn process_url(&self) -> String {
        format!("{}/process", self.base_url)
    }

    /// The health-probe endpoint (the service's root route).
    pub fn health_url(&self) -> String {
        format!("{}/", self.base_url)
    }
}
