use std::sync::Arc;

use flume::Sender;

use crate::{audio::system::AudioSystem, event::events::Event, http::ApiService};

/// Everything the view and the event handlers share: the proxy client, the
/// playback facade and the channel events funnel through.
pub struct AppContext {
    pub api: Arc<ApiService>,
    pub audio: AudioSystem,
    pub event_tx: Sender<Event>,
}
