use std::time::Duration;

use crate::model::Track;

#[derive(Debug, Clone)]
pub enum AudioCommand {
    PlayTrack(Track),
    Pause,
    Resume,
    Stop,
    Seek(Duration),
}
