use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Catalog previews are 30-second clips; used when the catalog reports no
/// duration for a track.
pub const DEFAULT_PREVIEW_SECONDS: u64 = 30;

/// Wire shape returned by the search proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_count: usize,
    pub results: Vec<SearchResult>,
}

/// One reshaped catalog entry, as returned by `GET /api/search`.
///
/// Every entry the proxy emits has a non-empty `preview_url`; entries
/// without one are dropped before the response is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub collection_name: Option<String>,
    pub preview_url: String,
    pub artwork_url60: Option<String>,
    pub artwork_url100: Option<String>,
    pub track_time_millis: Option<u64>,
    pub release_date: Option<String>,
    pub genre: Option<String>,
}

/// Error body the proxy returns on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: Option<String>,
}

/// A playable row in the result set. Immutable once built from a search
/// response; the whole collection is replaced on every new search.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub position: usize,
    pub name: String,
    pub artist: String,
    pub preview_url: String,
    pub artwork_url: Option<String>,
    pub duration_secs: u64,
    pub genre: Option<String>,
    pub release_date: Option<String>,
}

impl Track {
    pub fn from_result(position: usize, result: &SearchResult) -> Self {
        let name = result
            .track_name
            .clone()
            .or_else(|| result.collection_name.clone())
            .unwrap_or_else(|| "Unknown Title".to_string());
        let artist = result
            .artist_name
            .clone()
            .unwrap_or_else(|| "Unknown Artist".to_string());
        let artwork_url = result
            .artwork_url100
            .clone()
            .or_else(|| result.artwork_url60.clone());
        let duration_secs = result
            .track_time_millis
            .map(|millis| millis / 1000)
            .unwrap_or(DEFAULT_PREVIEW_SECONDS);

        Self {
            position,
            name,
            artist,
            preview_url: result.preview_url.clone(),
            artwork_url,
            duration_secs,
            genre: result.genre.clone(),
            release_date: result.release_date.clone(),
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

/// Builds the ordered result set, index-ordered as received.
pub fn tracks_from_response(response: &SearchResponse) -> Vec<Track> {
    response
        .results
        .iter()
        .enumerate()
        .map(|(position, result)| Track::from_result(position, result))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(track_name: Option<&str>, millis: Option<u64>) -> SearchResult {
        SearchResult {
            track_name: track_name.map(str::to_string),
            artist_name: Some("Artist".to_string()),
            collection_name: Some("Collection".to_string()),
            preview_url: "https://example.com/preview.m4a".to_string(),
            artwork_url60: Some("https://example.com/60.jpg".to_string()),
            artwork_url100: None,
            track_time_millis: millis,
            release_date: None,
            genre: Some("Rock".to_string()),
        }
    }

    #[test]
    fn track_name_falls_back_to_collection_name() {
        let track = Track::from_result(0, &result(None, Some(215_000)));
        assert_eq!(track.name, "Collection");
    }

    #[test]
    fn unknown_duration_defaults_to_preview_length() {
        let track = Track::from_result(0, &result(Some("Song"), None));
        assert_eq!(track.duration_secs, DEFAULT_PREVIEW_SECONDS);
    }

    #[test]
    fn duration_is_truncated_to_whole_seconds() {
        let track = Track::from_result(0, &result(Some("Song"), Some(215_999)));
        assert_eq!(track.duration_secs, 215);
    }

    #[test]
    fn artwork_prefers_high_resolution_with_fallback() {
        let track = Track::from_result(0, &result(Some("Song"), None));
        assert_eq!(track.artwork_url.as_deref(), Some("https://example.com/60.jpg"));
    }

    #[test]
    fn tracks_preserve_received_order() {
        let response = SearchResponse {
            result_count: 3,
            results: vec![
                result(Some("a"), None),
                result(Some("b"), None),
                result(Some("c"), None),
            ],
        };
        let tracks = tracks_from_response(&response);
        assert_eq!(tracks.len(), 3);
        assert_eq!(tracks[1].position, 1);
        assert_eq!(tracks[2].name, "c");
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let json = serde_json::to_value(&result(Some("Song"), Some(1000))).unwrap();
        assert!(json.get("trackName").is_some());
        assert!(json.get("previewUrl").is_some());
        assert!(json.get("artworkUrl60").is_some());
        assert!(json.get("trackTimeMillis").is_some());
    }
}
