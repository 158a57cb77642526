use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AudioError {
    #[error("Audio output device error: {0}")]
    Device(String),

    #[error("Failed to load preview: {0}")]
    Fetch(String),

    #[error("Failed to decode preview: {0}")]
    Decode(String),
}
