use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge, Widget},
};

use crate::audio::{progress::TrackProgress, state::PlaybackState};
use crate::util::colors;

/// Progress gauge plus the transport glyph. The glyph shows the action the
/// toggle would take, so a playing track shows the pause symbol.
pub struct TransportWidget<'a> {
    progress: &'a TrackProgress,
    state: &'a PlaybackState,
}

impl<'a> TransportWidget<'a> {
    pub fn new(progress: &'a TrackProgress, state: &'a PlaybackState) -> Self {
        Self { progress, state }
    }
}

impl Widget for TransportWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (current, total) = self.progress.get_progress();
        let glyph = match self.state {
            PlaybackState::Playing(_) => "⏸",
            PlaybackState::Loading(_) => "⋯",
            _ => "▶",
        };
        let label = format!(
            "{glyph} {} / {}",
            format_millis(current),
            format_millis(total)
        );

        Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(colors::PRIMARY).bg(colors::SECONDARY))
            .ratio(f64::from(self.progress.percent()) / 100.0)
            .label(label)
            .render(area, buf);
    }
}

pub fn format_millis(millis: u64) -> String {
    let secs = millis / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_millis(0), "0:00");
        assert_eq!(format_millis(9_000), "0:09");
        assert_eq!(format_millis(215_000), "3:35");
        assert_eq!(format_millis(3_600_000), "60:00");
    }
}
