use crate::model::{ErrorResponse, SearchResponse, Track, tracks_from_response};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3002";

/// Client for the search proxy.
pub struct ApiService {
    client: reqwest::Client,
    base_url: String,
}

impl ApiService {
    pub fn new() -> Self {
        let base_url = std::env::var("TUNESCOUT_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// One search, one outcome: the full result set, or an error carrying
    /// the proxy's message. Never retried.
    pub async fn search(&self, query: &str) -> color_eyre::Result<Vec<Track>> {
        let response = self
            .client
            .get(format!("{}/api/search", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.message.unwrap_or(body.error),
                Err(_) => format!("search failed with status {status}"),
            };
            return Err(color_eyre::eyre::eyre!(message));
        }

        let body: SearchResponse = response.json().await?;
        Ok(tracks_from_response(&body))
    }
}

impl Default for ApiService {
    fn default() -> Self {
        Self::new()
    }
}
