use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::audio::state::PlaybackState;
use crate::util::colors;

/// One-line banner for the active track; artwork renders as a glyph since
/// the terminal has no use for the image URL itself.
pub struct NowPlayingWidget<'a> {
    state: &'a PlaybackState,
}

impl<'a> NowPlayingWidget<'a> {
    pub fn new(state: &'a PlaybackState) -> Self {
        Self { state }
    }
}

impl Widget for NowPlayingWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = match self.state {
            PlaybackState::Stopped => Line::from(Span::styled(
                "Nothing playing",
                Style::default().fg(colors::NEUTRAL),
            )),
            PlaybackState::Loading(track) => Line::from(vec![
                Span::raw("Loading "),
                Span::styled(
                    track.name.clone(),
                    Style::default().fg(colors::PRIMARY),
                ),
                Span::raw("…"),
            ]),
            PlaybackState::Playing(track) | PlaybackState::Paused(track) => {
                let artwork = if track.artwork_url.is_some() { "▣ " } else { "♪ " };
                let mut spans = vec![
                    Span::styled(artwork, Style::default().fg(colors::ACCENT)),
                    Span::styled(
                        track.name.clone(),
                        Style::default()
                            .fg(colors::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" by "),
                    Span::raw(track.artist.clone()),
                ];
                if let Some(genre) = &track.genre {
                    spans.push(Span::styled(
                        format!("  ({genre})"),
                        Style::default().fg(colors::NEUTRAL),
                    ));
                }
                Line::from(spans)
            }
            PlaybackState::Error(message) => Line::from(Span::styled(
                format!("Playback failed: {message}"),
                Style::default().fg(colors::DANGER),
            )),
        };

        Paragraph::new(line)
            .block(Block::default().borders(Borders::ALL).title("Now Playing"))
            .render(area, buf);
    }
}
