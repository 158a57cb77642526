use std::path::PathBuf;

/// Proxy configuration, read from the environment with defaults matching a
/// local development setup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub upstream_url: String,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host =
            std::env::var("TUNESCOUT_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("TUNESCOUT_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(3002);
        let static_dir = std::env::var("TUNESCOUT_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));
        let upstream_url = std::env::var("TUNESCOUT_UPSTREAM_URL")
            .unwrap_or_else(|_| "https://itunes.apple.com".to_string());

        Self {
            host,
            port,
            static_dir,
            upstream_url,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3002,
            static_dir: PathBuf::from("public"),
            upstream_url: "https://itunes.apple.com".to_string(),
        }
    }
}
