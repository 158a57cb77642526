use crate::model::Track;

/// Monotonic token attached to every search request. A response is applied
/// to the UI only when its token matches the most recently issued one, so a
/// slow search can never overwrite the state of a newer one.
pub type SearchToken = u64;

#[derive(Debug, Clone)]
pub enum Event {
    // Notifications
    SearchResults(SearchToken, Vec<Track>),
    SearchFailed(SearchToken, String),
    TrackStarted(Track),
    TrackEnded,
    PlaybackError(String),

    // Commands
    Search(String),
    Play(usize),
    PlayPause,
    Next,
    Previous,
    SeekForward,
    SeekBackward,
}
