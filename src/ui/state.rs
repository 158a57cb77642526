use crate::event::events::SearchToken;

/// Lifecycle of the current search, as the view renders it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Loading {
        query: String,
    },
    Loaded {
        query: String,
    },
    NoResults {
        query: String,
    },
    Failed {
        message: String,
    },
}

/// Hands out one token per outgoing search and recognizes the latest one.
/// Responses carrying an older token were superseded and must be dropped.
#[derive(Debug, Default)]
pub struct SearchSequence {
    latest: SearchToken,
}

impl SearchSequence {
    pub fn next(&mut self) -> SearchToken {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, token: SearchToken) -> bool {
        token == self.latest
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub search: SearchState,
    /// One-line notice shown in the status bar until the next event clears it.
    pub status_message: Option<String>,
}

impl UiState {
    pub fn begin_search(&mut self, query: String) {
        self.search = SearchState::Loading { query };
        self.status_message = None;
    }

    /// Applies a search response unless its token was superseded; a stale
    /// response leaves the state untouched. Returns whether it was applied.
    pub fn apply_results(
        &mut self,
        seq: &SearchSequence,
        token: SearchToken,
        result_count: usize,
    ) -> bool {
        if !seq.is_current(token) {
            return false;
        }

        let query = self.loading_query();
        self.search = if result_count == 0 {
            SearchState::NoResults { query }
        } else {
            SearchState::Loaded { query }
        };
        true
    }

    /// Same gate for the failure path: only the latest search may render an
    /// error state.
    pub fn apply_failure(
        &mut self,
        seq: &SearchSequence,
        token: SearchToken,
        message: String,
    ) -> bool {
        if !seq.is_current(token) {
            return false;
        }

        self.search = SearchState::Failed { message };
        true
    }

    fn loading_query(&self) -> String {
        match &self.search {
            SearchState::Loading { query } => query.clone(),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_results_are_dropped_and_loading_stays() {
        let mut seq = SearchSequence::default();
        let mut state = UiState::default();

        let first = seq.next();
        state.begin_search("old".to_string());
        let second = seq.next();
        state.begin_search("new".to_string());

        assert!(!state.apply_results(&seq, first, 5));
        assert_eq!(
            state.search,
            SearchState::Loading {
                query: "new".to_string()
            }
        );

        assert!(state.apply_results(&seq, second, 5));
        assert_eq!(
            state.search,
            SearchState::Loaded {
                query: "new".to_string()
            }
        );
    }

    #[test]
    fn stale_failure_cannot_overwrite_newer_results() {
        let mut seq = SearchSequence::default();
        let mut state = UiState::default();

        let first = seq.next();
        state.begin_search("old".to_string());
        let second = seq.next();
        state.begin_search("new".to_string());

        assert!(state.apply_results(&seq, second, 3));
        assert!(!state.apply_failure(&seq, first, "timed out".to_string()));
        assert_eq!(
            state.search,
            SearchState::Loaded {
                query: "new".to_string()
            }
        );
    }

    #[test]
    fn latest_empty_response_shows_no_results() {
        let mut seq = SearchSequence::default();
        let mut state = UiState::default();

        let token = seq.next();
        state.begin_search("nothing".to_string());

        assert!(state.apply_results(&seq, token, 0));
        assert_eq!(
            state.search,
            SearchState::NoResults {
                query: "nothing".to_string()
            }
        );
    }

    #[test]
    fn latest_failure_clears_loading() {
        let mut seq = SearchSequence::default();
        let mut state = UiState::default();

        let token = seq.next();
        state.begin_search("query".to_string());

        assert!(state.apply_failure(&seq, token, "connection refused".to_string()));
        assert_eq!(
            state.search,
            SearchState::Failed {
                message: "connection refused".to_string()
            }
        );
    }

    #[test]
    fn begin_search_clears_the_status_notice() {
        let mut state = UiState::default();
        state.status_message = Some("Please enter a search term".to_string());
        state.begin_search("query".to_string());
        assert_eq!(state.status_message, None);
    }
}
