use flume::Sender;

use crate::audio::{
    commands::AudioCommand,
    controller::AudioController,
    engine::PlaybackEngine,
    progress::TrackProgress,
    queue::PreviewQueue,
    state::PlaybackState,
};
use crate::event::events::Event;
use crate::model::Track;

/// Facade tying the result set to the playback controller. All mutation
/// paths (explicit play, transport toggle, next/previous, natural end of
/// track) go through here so they converge on the same state.
pub struct AudioSystem {
    controller: AudioController,
    queue: PreviewQueue,
}

impl AudioSystem {
    pub fn new(event_tx: Sender<Event>) -> Result<Self, crate::audio::error::AudioError> {
        let engine = PlaybackEngine::new()?;
        let controller = AudioController::new(engine, event_tx);

        Ok(Self {
            controller,
            queue: PreviewQueue::new(),
        })
    }

    /// Replaces the result set wholesale. Anything already playing keeps
    /// playing; the position is forgotten so indicators re-derive cleanly.
    pub fn load_results(&mut self, tracks: Vec<Track>) {
        self.queue.replace(tracks);
    }

    /// Play the track at `index`; out-of-range indices are a no-op.
    pub async fn play_index(&mut self, index: usize) {
        if let Some(track) = self.queue.select(index) {
            self.controller
                .handle_command(AudioCommand::PlayTrack(track))
                .await;
        }
    }

    pub async fn play_next(&mut self) {
        if let Some(track) = self.queue.next() {
            self.controller
                .handle_command(AudioCommand::PlayTrack(track))
                .await;
        }
    }

    pub async fn play_previous(&mut self) {
        if let Some(track) = self.queue.previous() {
            self.controller
                .handle_command(AudioCommand::PlayTrack(track))
                .await;
        }
    }

    /// Natural end of track behaves exactly like an explicit Next, including
    /// the wraparound from the last row back to the first.
    pub async fn on_track_ended(&mut self) {
        self.play_next().await;
    }

    /// Global transport toggle: playing pauses, paused resumes, and an idle
    /// state with a selected row replays that row. With nothing loaded and
    /// nothing selected this is a no-op.
    pub async fn play_pause(&mut self) {
        match self.controller.state() {
            PlaybackState::Playing(_) => {
                self.controller.handle_command(AudioCommand::Pause).await;
            }
            PlaybackState::Paused(_) => {
                self.controller.handle_command(AudioCommand::Resume).await;
            }
            PlaybackState::Stopped | PlaybackState::Error(_) => {
                if let Some(index) = self.queue.current_index() {
                    self.play_index(index).await;
                }
            }
            PlaybackState::Loading(_) => {}
        }
    }

    /// Write side of scrubbing: seek to `percent` of the total duration.
    pub async fn seek_to_percent(&mut self, percent: u8) {
        let target = self.controller.track_progress.position_for_percent(percent);
        self.controller
            .handle_command(AudioCommand::Seek(target))
            .await;
    }

    pub async fn seek_by_percent(&mut self, delta: i8) {
        let current = self.controller.track_progress.percent() as i16;
        let target = (current + i16::from(delta)).clamp(0, 100) as u8;
        self.seek_to_percent(target).await;
    }

    pub async fn stop(&mut self) {
        self.controller.handle_command(AudioCommand::Stop).await;
    }

    pub fn tracks(&self) -> &[Track] {
        self.queue.tracks()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    pub fn is_playing(&self) -> bool {
        self.controller.is_playing()
    }

    pub fn current_track(&self) -> Option<Track> {
        self.controller.current_track()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn track_progress(&self) -> &TrackProgress {
        &self.controller.track_progress
    }
}
