use serde::Deserialize;

use crate::model::SearchResult;
use crate::server::error::{ApiError, Result};

/// Client for the external catalog search API (iTunes Search API shape).
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    results: Vec<CatalogEntry>,
}

/// Raw upstream entry; only the fields the proxy reshapes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub collection_name: Option<String>,
    pub preview_url: Option<String>,
    pub artwork_url60: Option<String>,
    pub artwork_url100: Option<String>,
    pub track_time_millis: Option<u64>,
    pub release_date: Option<String>,
    pub primary_genre_name: Option<String>,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Up to 50 song matches for `term`, keeping only entries that carry a
    /// playable preview. Upstream failures surface as-is; never retried.
    pub async fn search_songs(&self, term: &str) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("term", term),
                ("media", "music"),
                ("entity", "song"),
                ("limit", "50"),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "catalog API responded with status: {}",
                response.status()
            )));
        }

        let body: CatalogResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Upstream(e.to_string()))?;

        Ok(reshape(body.results))
    }
}

/// Drops entries without a preview URL and maps the rest onto the wire
/// shape the player consumes.
pub fn reshape(entries: Vec<CatalogEntry>) -> Vec<SearchResult> {
    entries
        .into_iter()
        .filter_map(|entry| {
            let preview_url = entry.preview_url.filter(|url| !url.is_empty())?;
            Some(SearchResult {
                track_name: entry.track_name,
                artist_name: entry.artist_name,
                collection_name: entry.collection_name,
                preview_url,
                artwork_url60: entry.artwork_url60,
                artwork_url100: entry.artwork_url100,
                track_time_millis: entry.track_time_millis,
                release_date: entry.release_date,
                genre: entry.primary_genre_name,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANNED: &str = r#"{
        "resultCount": 3,
        "results": [
            {
                "trackName": "First",
                "artistName": "Artist A",
                "collectionName": "Album A",
                "previewUrl": "https://audio.example.com/first.m4a",
                "artworkUrl60": "https://img.example.com/60.jpg",
                "artworkUrl100": "https://img.example.com/100.jpg",
                "trackTimeMillis": 215000,
                "releaseDate": "2019-06-21T07:00:00Z",
                "primaryGenreName": "Pop"
            },
            {
                "trackName": "No Preview",
                "artistName": "Artist B",
                "collectionName": "Album B"
            },
            {
                "trackName": "Third",
                "artistName": "Artist C",
                "previewUrl": "https://audio.example.com/third.m4a"
            }
        ]
    }"#;

    #[test]
    fn entries_without_preview_are_dropped() {
        let body: CatalogResponse = serde_json::from_str(CANNED).unwrap();
        let results = reshape(body.results);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.preview_url.is_empty()));
    }

    #[test]
    fn fields_survive_the_reshape() {
        let body: CatalogResponse = serde_json::from_str(CANNED).unwrap();
        let results = reshape(body.results);
        let first = &results[0];
        assert_eq!(first.track_name.as_deref(), Some("First"));
        assert_eq!(first.genre.as_deref(), Some("Pop"));
        assert_eq!(first.track_time_millis, Some(215_000));
        assert_eq!(
            first.artwork_url100.as_deref(),
            Some("https://img.example.com/100.jpg")
        );
    }

    #[test]
    fn empty_preview_url_counts_as_missing() {
        let entry = CatalogEntry {
            track_name: Some("Silent".to_string()),
            preview_url: Some(String::new()),
            ..Default::default()
        };
        assert!(reshape(vec![entry]).is_empty());
    }
}
