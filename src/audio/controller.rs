use std::io::Cursor;
use std::sync::{
    Arc, RwLock,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use flume::Sender;
use rodio::{Decoder, Source};
use tracing::{debug, info};

use crate::audio::{
    commands::AudioCommand, engine::PlaybackEngine, error::AudioError, progress::TrackProgress,
    state::PlaybackState,
};
use crate::event::events::Event;
use crate::model::Track;

const MONITOR_INTERVAL: Duration = Duration::from_millis(125);

/// Drives the playback engine and owns the authoritative [`PlaybackState`].
///
/// Preview fetch/decode runs on a spawned task; starting a new track aborts
/// the previous task and bumps a generation counter so an aborted fetch that
/// already decoded can never reach the sink.
pub struct AudioController {
    engine: PlaybackEngine,
    client: reqwest::Client,
    state: Arc<RwLock<PlaybackState>>,
    event_tx: Sender<Event>,
    pub track_progress: Arc<TrackProgress>,
    current_playback_task: Option<tokio::task::JoinHandle<()>>,
    playback_generation: Arc<AtomicU64>,
}

impl AudioController {
    pub fn new(engine: PlaybackEngine, event_tx: Sender<Event>) -> Self {
        let controller = Self {
            engine,
            client: reqwest::Client::new(),
            state: Arc::new(RwLock::new(PlaybackState::Stopped)),
            event_tx,
            track_progress: Arc::new(TrackProgress::default()),
            current_playback_task: None,
            playback_generation: Arc::new(AtomicU64::new(0)),
        };

        controller.start_monitor();
        controller
    }

    /// Publishes elapsed position on every tick and turns a drained sink
    /// into a `TrackEnded` notification (the auto-advance trigger).
    fn start_monitor(&self) {
        let sink = self.engine.sink();
        let progress = self.track_progress.clone();
        let state = self.state.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            loop {
                tokio::time::sleep(MONITOR_INTERVAL).await;

                let is_playing = {
                    let state_guard = state.read().unwrap();
                    matches!(*state_guard, PlaybackState::Playing(_))
                };

                if is_playing {
                    progress.set_current_position(sink.get_pos());

                    if sink.empty() {
                        let mut state_guard = state.write().unwrap();
                        *state_guard = PlaybackState::Stopped;
                        drop(state_guard);
                        let _ = event_tx.send(Event::TrackEnded);
                    }
                }
            }
        });
    }

    pub async fn handle_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::PlayTrack(track) => self.play_track(track),
            AudioCommand::Pause => self.pause(),
            AudioCommand::Resume => self.resume(),
            AudioCommand::Stop => self.stop(),
            AudioCommand::Seek(pos) => self.seek(pos),
        }
    }

    fn play_track(&mut self, track: Track) {
        self.stop();

        {
            let mut state = self.state.write().unwrap();
            *state = PlaybackState::Loading(track.clone());
        }

        let generation = self.playback_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let playback_generation = self.playback_generation.clone();
        let client = self.client.clone();
        let sink = self.engine.sink();
        let progress = self.track_progress.clone();
        let state = self.state.clone();
        let event_tx = self.event_tx.clone();

        info!("Loading preview for '{}'", track.name);

        self.current_playback_task = Some(tokio::spawn(async move {
            match load_preview(&client, &track).await {
                Ok(source) => {
                    if playback_generation.load(Ordering::SeqCst) != generation {
                        return;
                    }

                    let total = source.total_duration().unwrap_or_else(|| track.duration());
                    if !start_on_sink(&sink, &playback_generation, generation, source) {
                        return;
                    }

                    progress.reset();
                    progress.set_total_duration(total);

                    {
                        let mut state_guard = state.write().unwrap();
                        *state_guard = PlaybackState::Playing(track.clone());
                    }
                    let _ = event_tx.send(Event::TrackStarted(track));
                }
                Err(e) => {
                    if playback_generation.load(Ordering::SeqCst) != generation {
                        return;
                    }

                    progress.reset();
                    {
                        let mut state_guard = state.write().unwrap();
                        *state_guard = PlaybackState::Error(e.to_string());
                    }
                    let _ = event_tx.send(Event::PlaybackError(e.to_string()));
                }
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(task) = self.current_playback_task.take() {
            task.abort();
        }
        self.playback_generation.fetch_add(1, Ordering::SeqCst);
        self.engine.stop();
        self.track_progress.reset();
        let mut state = self.state.write().unwrap();
        *state = PlaybackState::Stopped;
    }

    fn pause(&self) {
        self.engine.pause();
        self.track_progress
            .set_current_position(self.engine.get_pos());
        let mut state = self.state.write().unwrap();
        if let PlaybackState::Playing(track) = &*state {
            *state = PlaybackState::Paused(track.clone());
        }
    }

    fn resume(&self) {
        let mut state = self.state.write().unwrap();
        if let PlaybackState::Paused(track) = &*state {
            self.engine.play();
            *state = PlaybackState::Playing(track.clone());
        }
    }

    fn seek(&self, pos: Duration) {
        // Seeking with nothing loaded is harmless; the sink just refuses.
        if let Err(e) = self.engine.try_seek(pos) {
            debug!("Seek ignored: {e}");
            return;
        }
        self.track_progress.set_current_position(pos);
    }

    pub fn state(&self) -> PlaybackState {
        self.state.read().unwrap().clone()
    }

    pub fn is_playing(&self) -> bool {
        matches!(*self.state.read().unwrap(), PlaybackState::Playing(_))
    }

    pub fn current_track(&self) -> Option<Track> {
        self.state.read().unwrap().track().cloned()
    }
}

/// Appends the decoded source and starts the sink, then takes a second look
/// at the generation: `stop` may have cleared the sink while the source was
/// in flight, and a superseded source must not stay queued. Returns whether
/// the source is the one now playing.
fn start_on_sink(
    sink: &rodio::Sink,
    generation: &AtomicU64,
    expected: u64,
    source: impl Source + Send + 'static,
) -> bool {
    sink.append(source);
    // A stopped sink stays paused until told otherwise.
    sink.play();

    if generation.load(Ordering::SeqCst) != expected {
        sink.stop();
        return false;
    }
    true
}

/// Downloads the preview clip and decodes it into a playable source.
async fn load_preview(
    client: &reqwest::Client,
    track: &Track,
) -> Result<Decoder<Cursor<Vec<u8>>>, AudioError> {
    let response = client
        .get(&track.preview_url)
        .send()
        .await
        .map_err(|e| AudioError::Fetch(e.to_string()))?
        .error_for_status()
        .map_err(|e| AudioError::Fetch(e.to_string()))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| AudioError::Fetch(e.to_string()))?
        .to_vec();

    tokio::task::spawn_blocking(move || {
        Decoder::new(Cursor::new(bytes)).map_err(|e| AudioError::Decode(e.to_string()))
    })
    .await
    .map_err(|e| AudioError::Decode(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use rodio::{Sink, mixer, source::SineWave};

    // A sink fed into a bare mixer needs no audio device.
    fn headless_sink() -> (Sink, mixer::MixerSource) {
        let (mixer, output) = mixer::mixer(2, 44_100);
        (Sink::connect_new(&mixer), output)
    }

    fn clip() -> impl Source + Send + 'static {
        SineWave::new(440.0).take_duration(Duration::from_millis(50))
    }

    #[test]
    fn current_source_starts_the_sink() {
        let (sink, _output) = headless_sink();
        let generation = AtomicU64::new(1);

        assert!(start_on_sink(&sink, &generation, 1, clip()));
        assert!(!sink.empty());
        assert!(!sink.is_paused());
    }

    #[test]
    fn superseded_source_is_cleared_from_the_sink() {
        let (sink, _output) = headless_sink();
        let generation = AtomicU64::new(1);

        // Stop advanced the generation while this source was in flight.
        generation.store(2, Ordering::SeqCst);

        assert!(!start_on_sink(&sink, &generation, 1, clip()));
        assert!(sink.empty());
    }
}
