use std::sync::Arc;

use flume::Receiver;
use ratatui::{
    Frame,
    crossterm::event::{KeyCode, KeyEvent, KeyModifiers},
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
};
use tracing::{debug, info};

use crate::{
    audio::system::AudioSystem,
    event::events::{Event, SearchToken},
    http::ApiService,
    model::Track,
    ui::{
        Action,
        components::{now_playing::NowPlayingWidget, progress::TransportWidget},
        context::AppContext,
        input::InputHandler,
        search::SearchView,
        state::{SearchSequence, UiState},
        tui::{self, TerminalEvent},
    },
    util::{colors, task::TaskManager},
};

const SEEK_STEP_PERCENT: i8 = 5;

pub struct App {
    pub event_rx: Receiver<Event>,
    pub ctx: AppContext,
    pub state: UiState,
    view: SearchView,
    tasks: TaskManager,
    /// Issues a token per search task; responses carrying an older token
    /// are superseded and dropped.
    search_seq: SearchSequence,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let api = Arc::new(ApiService::new());
        let audio = AudioSystem::new(event_tx.clone())?;

        Ok(Self {
            event_rx,
            ctx: AppContext {
                api,
                audio,
                event_tx,
            },
            state: UiState::default(),
            view: SearchView::default(),
            tasks: TaskManager::new(),
            search_seq: SearchSequence::default(),
            has_focus: true,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        while !self.should_quit {
            tui.draw(|f| self.ui(f))?;
            self.handle_events(&mut tui).await?;
        }

        self.tasks.abort_all();
        self.ctx.audio.stop().await;
        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        if !self.has_focus {
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.view.render(frame, chunks[0], &self.state, &self.ctx);

        let playback = self.ctx.audio.playback_state();
        frame.render_widget(NowPlayingWidget::new(&playback), chunks[1]);
        frame.render_widget(
            TransportWidget::new(self.ctx.audio.track_progress(), &playback),
            chunks[2],
        );
        self.render_status_line(frame, chunks[3]);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.state.status_message {
            Some(message) => Line::styled(message.clone(), Style::default().fg(colors::ACCENT)),
            None => Line::styled(
                "/ search  enter play  space play/pause  n next  p previous  ←/→ scrub  q quit",
                Style::default().fg(colors::NEUTRAL),
            ),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    async fn handle_events(&mut self, tui: &mut tui::Tui) -> color_eyre::Result<()> {
        if let Some(evt) = tui.next().await {
            match evt {
                TerminalEvent::FocusGained => {
                    self.has_focus = true;
                    tui.clear()?;
                }
                TerminalEvent::FocusLost => self.has_focus = false,
                TerminalEvent::Key(key) => self.handle_key(key),
                TerminalEvent::Tick | TerminalEvent::Resize(_, _) => {}
            }
        }

        while let Ok(evt) = self.event_rx.try_recv() {
            self.handle_action(evt).await;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.view.handle_key(key, &self.ctx) {
            Some(Action::Quit) => self.should_quit = true,
            Some(Action::None) => {}
            None => {
                if let Some(event) = InputHandler::handle_key(key) {
                    let _ = self.ctx.event_tx.send(event);
                }
            }
        }
    }

    async fn handle_action(&mut self, evt: Event) {
        match evt {
            Event::Search(query) => self.start_search(query),
            Event::SearchResults(token, tracks) => self.apply_results(token, tracks),
            Event::SearchFailed(token, message) => self.apply_failure(token, message),
            Event::Play(index) => self.ctx.audio.play_index(index).await,
            Event::PlayPause => self.ctx.audio.play_pause().await,
            Event::Next => self.ctx.audio.play_next().await,
            Event::Previous => self.ctx.audio.play_previous().await,
            Event::SeekForward => self.ctx.audio.seek_by_percent(SEEK_STEP_PERCENT).await,
            Event::SeekBackward => self.ctx.audio.seek_by_percent(-SEEK_STEP_PERCENT).await,
            Event::TrackStarted(track) => {
                info!("Now playing: {} by {}", track.name, track.artist);
                self.state.status_message = None;
            }
            Event::TrackEnded => self.ctx.audio.on_track_ended().await,
            Event::PlaybackError(message) => {
                self.state.status_message = Some(format!("Playback error: {message}"));
            }
        }
    }

    fn start_search(&mut self, query: String) {
        let query = query.trim().to_string();
        if query.is_empty() {
            self.state.status_message = Some("Please enter a search term".to_string());
            return;
        }

        let token = self.search_seq.next();
        self.state.begin_search(query.clone());

        let api = self.ctx.api.clone();
        let tx = self.ctx.event_tx.clone();
        self.tasks.spawn(
            "search",
            tokio::spawn(async move {
                match api.search(&query).await {
                    Ok(tracks) => {
                        let _ = tx.send(Event::SearchResults(token, tracks));
                    }
                    Err(err) => {
                        let _ = tx.send(Event::SearchFailed(token, err.to_string()));
                    }
                }
            }),
        );
    }

    fn apply_results(&mut self, token: SearchToken, tracks: Vec<Track>) {
        if !self.state.apply_results(&self.search_seq, token, tracks.len()) {
            debug!("Dropping results for superseded search #{token}");
            return;
        }

        if tracks.is_empty() {
            self.ctx.audio.load_results(Vec::new());
            return;
        }

        info!("Search returned {} tracks", tracks.len());
        self.ctx.audio.load_results(tracks);
        self.view.on_results();
    }

    fn apply_failure(&mut self, token: SearchToken, message: String) {
        if !self.state.apply_failure(&self.search_seq, token, message) {
            debug!("Dropping failure for superseded search #{token}");
        }
    }
}
