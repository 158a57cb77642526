pub mod now_playing;
pub mod progress;
pub mod spinner;
