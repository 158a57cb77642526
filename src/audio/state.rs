use crate::model::Track;

/// The single authoritative playback state. Every event source (explicit
/// command, natural end of track, load failure) converges here, and all
/// icon/indicator rendering derives from it.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackState {
    Stopped,
    Loading(Track),
    Playing(Track),
    Paused(Track),
    Error(String),
}

impl PlaybackState {
    pub fn track(&self) -> Option<&Track> {
        match self {
            PlaybackState::Loading(t) | PlaybackState::Playing(t) | PlaybackState::Paused(t) => {
                Some(t)
            }
            _ => None,
        }
    }
}
