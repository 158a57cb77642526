use ratatui::crossterm::event::{KeyCode, KeyEvent};

use crate::event::events::Event;

/// Transport keys that work anywhere outside the search input.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<Event> {
        match key.code {
            KeyCode::Char(' ') => Some(Event::PlayPause),
            KeyCode::Char('n') => Some(Event::Next),
            KeyCode::Char('p') => Some(Event::Previous),
            KeyCode::Left => Some(Event::SeekBackward),
            KeyCode::Right => Some(Event::SeekForward),
            _ => None,
        }
    }
}
