use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::event::events::Event;
use crate::ui::{
    Action,
    components::{progress::format_millis, spinner::Spinner},
    context::AppContext,
    state::{SearchState, UiState},
};
use crate::util::colors;

/// The search box and the result list below it. Editing mode captures every
/// key; list mode hands unclaimed keys back for the transport bindings.
pub struct SearchView {
    input: String,
    is_editing: bool,
    list_state: ListState,
}

impl Default for SearchView {
    fn default() -> Self {
        Self {
            input: String::new(),
            is_editing: true,
            list_state: ListState::default(),
        }
    }
}

impl SearchView {
    pub fn render(&mut self, f: &mut Frame, area: Rect, state: &UiState, ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let input_style = if self.is_editing {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };
        let input_block = Block::default()
            .borders(Borders::ALL)
            .title("Search")
            .border_style(input_style);
        f.render_widget(Paragraph::new(self.input.clone()).block(input_block), chunks[0]);

        let results_area = chunks[1];
        match &state.search {
            SearchState::Idle => {
                let hint = Paragraph::new("Type a search term and press Enter to find previews.")
                    .style(Style::default().fg(colors::NEUTRAL))
                    .block(Block::default().borders(Borders::ALL).title("Results"));
                f.render_widget(hint, results_area);
            }
            SearchState::Loading { query } => {
                let spinner = Spinner::default()
                    .with_style(Style::default().fg(colors::PRIMARY))
                    .with_label(format!("Searching for \"{query}\"…"));
                f.render_widget(
                    Block::default().borders(Borders::ALL).title("Results"),
                    results_area,
                );
                f.render_widget(spinner, results_area);
            }
            SearchState::Failed { message } => {
                let error = Paragraph::new(message.clone())
                    .style(Style::default().fg(colors::DANGER))
                    .block(Block::default().borders(Borders::ALL).title("Error"));
                f.render_widget(error, results_area);
            }
            SearchState::NoResults { query } => {
                let empty = Paragraph::new(format!(
                    "No songs found for \"{query}\". Try a different search term."
                ))
                .style(Style::default().fg(colors::NEUTRAL))
                .block(Block::default().borders(Borders::ALL).title("Results"));
                f.render_widget(empty, results_area);
            }
            SearchState::Loaded { query } => {
                self.render_results(f, results_area, query, ctx);
            }
        }
    }

    fn render_results(&mut self, f: &mut Frame, area: Rect, query: &str, ctx: &AppContext) {
        let tracks = ctx.audio.tracks();
        let current = ctx.audio.current_index();
        let is_playing = ctx.audio.is_playing();

        let text_width = usize::from(area.width.saturating_sub(12));
        let items: Vec<ListItem> = tracks
            .iter()
            .enumerate()
            .map(|(index, track)| {
                let is_current = current == Some(index);
                let glyph = if is_current && is_playing { "⏸" } else { "▶" };
                let glyph_style = if is_current {
                    Style::default().fg(colors::ACCENT)
                } else {
                    Style::default().fg(colors::NEUTRAL)
                };
                let title_style = if is_current {
                    Style::default()
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                let label = fit(&format!("{} - {}", track.name, track.artist), text_width);
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{glyph} "), glyph_style),
                    Span::styled(label, title_style),
                    Span::styled(
                        format!("  {}", format_millis(track.duration_secs * 1000)),
                        Style::default().fg(colors::NEUTRAL),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Search Results for \"{query}\"")),
            )
            .highlight_style(Style::default().bg(colors::SECONDARY))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }

    pub fn handle_key(&mut self, key: KeyEvent, ctx: &AppContext) -> Option<Action> {
        if self.is_editing {
            match key.code {
                KeyCode::Enter => {
                    let _ = ctx.event_tx.send(Event::Search(self.input.clone()));
                    self.is_editing = false;
                }
                KeyCode::Esc => self.is_editing = false,
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c) => self.input.push(c),
                _ => {}
            }
            return Some(Action::None);
        }

        match key.code {
            KeyCode::Char('/') => {
                self.is_editing = true;
                Some(Action::None)
            }
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1, ctx);
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1, ctx);
                Some(Action::None)
            }
            KeyCode::Enter => {
                if let Some(index) = self.list_state.selected() {
                    let _ = ctx.event_tx.send(Event::Play(index));
                }
                Some(Action::None)
            }
            _ => None,
        }
    }

    /// Called when a fresh result set lands, so the cursor starts at the top.
    pub fn on_results(&mut self) {
        self.list_state.select(Some(0));
    }

    fn move_selection(&mut self, delta: isize, ctx: &AppContext) {
        let len = ctx.audio.tracks().len();
        if len == 0 {
            return;
        }
        let selected = self.list_state.selected().unwrap_or(0) as isize;
        let next = (selected + delta).clamp(0, len as isize - 1) as usize;
        self.list_state.select(Some(next));
    }
}

/// Truncate to `max_width` terminal columns, wide characters included.
fn fit(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::fit;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(fit("abc", 10), "abc");
    }

    #[test]
    fn long_text_is_truncated_with_ellipsis() {
        assert_eq!(fit("abcdefgh", 5), "abcd…");
    }

    #[test]
    fn wide_characters_count_double() {
        // Each CJK glyph occupies two columns.
        assert_eq!(fit("音楽音楽", 5), "音楽…");
    }
}
