use std::sync::Arc;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::audio::error::AudioError;

/// Owns the rodio output stream and its single sink.
///
/// The stream handle is not `Send` and stays on the UI thread for the life
/// of the program; background tasks get clones of the `Arc<Sink>`, which is
/// safe to touch from anywhere. Exactly one preview is ever loaded at a
/// time.
pub struct PlaybackEngine {
    _stream: OutputStream,
    sink: Arc<Sink>,
}

impl PlaybackEngine {
    pub fn new() -> Result<Self, AudioError> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| AudioError::Device(e.to_string()))?;
        let sink = Arc::new(Sink::connect_new(stream.mixer()));

        Ok(Self {
            _stream: stream,
            sink,
        })
    }

    /// Shared handle for playback tasks and the progress monitor.
    pub fn sink(&self) -> Arc<Sink> {
        self.sink.clone()
    }

    pub fn pause(&self) {
        self.sink.pause();
    }

    pub fn play(&self) {
        self.sink.play();
    }

    pub fn stop(&self) {
        self.sink.stop();
    }

    pub fn get_pos(&self) -> std::time::Duration {
        self.sink.get_pos()
    }

    pub fn try_seek(&self, pos: std::time::Duration) -> Result<(), rodio::source::SeekError> {
        self.sink.try_seek(pos)
    }
}
