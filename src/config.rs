use std::path::PathBuf;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the property service, e.g. `http://localhost:5000/api`.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Where the session token survives process restarts.
    pub token_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url = std::env::var("HITECH_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000/api".to_string());
        let request_timeout_secs = std::env::var("HITECH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);
        let token_path = std::env::var("HITECH_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".hitech_session"));
        Ok(Self {
            api_base_url,
            request_timeout_secs,
            token_path,
        })
    }
}
