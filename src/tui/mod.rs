//! Terminal front end: app state, key handling and drawing.

mod draw;
mod items;
mod keymap;
mod theme;

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::ListState;
use tracing::warn;

use crate::config::StationConfig;
use crate::decoder::CommandSink;
use crate::error::{Error, Result};
use crate::event::AppEvent;
use crate::player::{PlayerController, PROGRESS_FALLBACK};
use crate::playlist::{CatalogStation, Feedback};

pub use draw::draw;
pub use items::{Action, CommandItem, Selectable, StationItem};
pub use keymap::{Binding, Command, BINDINGS};
pub use theme::Theme;

const STATUS_TTL: Duration = Duration::from_secs(5);
const READY: &str = "Ready";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pane {
    Stations,
    Commands,
}

pub struct App<C> {
    pub player: PlayerController<C>,
    stations: Vec<StationConfig>,
    station_items: Vec<StationItem>,
    command_items: Vec<CommandItem>,
    pane: Pane,
    station_state: ListState,
    command_state: ListState,
    theme: Theme,
    status: String,
    status_time: Instant,
    /// Progress text from the last tick.
    footer: String,
    shown_generation: u64,
    pub dirty: bool,
    pub should_quit: bool,
}

impl<C: CommandSink> App<C> {
    pub fn new(player: PlayerController<C>, stations: Vec<StationConfig>, theme: Theme) -> Self {
        let station_items = stations
            .iter()
            .enumerate()
            .map(|(index, s)| StationItem {
                index,
                name: s.name.clone(),
            })
            .collect::<Vec<_>>();
        let command_items = keymap::labelled()
            .map(|binding| CommandItem { binding })
            .collect();

        let mut station_state = ListState::default();
        if !station_items.is_empty() {
            station_state.select(Some(0));
        }
        let mut command_state = ListState::default();
        command_state.select(Some(0));

        let status = if stations.is_empty() {
            "No stations configured".to_string()
        } else {
            format!("Loaded {} stations", stations.len())
        };

        Self {
            player,
            stations,
            station_items,
            command_items,
            pane: Pane::Stations,
            station_state,
            command_state,
            theme,
            status,
            status_time: Instant::now(),
            footer: PROGRESS_FALLBACK.to_string(),
            shown_generation: 0,
            dirty: true,
            should_quit: false,
        }
    }

    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn footer(&self) -> &str {
        &self.footer
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status = msg.to_string();
        self.status_time = Instant::now();
        self.dirty = true;
    }

    pub fn expire_status(&mut self) {
        if self.status_time.elapsed() > STATUS_TTL && self.status != READY {
            self.set_status(READY);
        }
    }

    // ── Event handling ─────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        // Ctrl+C always quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Enter => {
                if let Some(action) = self.selected_action() {
                    self.activate(action);
                }
            }
            code => {
                if let Some(command) = keymap::lookup(code) {
                    self.run(command);
                }
            }
        }
        self.dirty = true;
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Decoder(event) => {
                let before = (self.player.status(), self.player.generation());
                let result = self.player.handle_event(event);
                self.report(result, None);
                if (self.player.status(), self.player.generation()) != before {
                    self.dirty = true;
                }
            }
            AppEvent::DecoderExited => {
                self.player.on_decoder_exit();
                self.report(Err(Error::ProcessUnavailable), None);
            }
            AppEvent::Tick(handle) => {
                if let Some(progress) = self.player.on_tick(handle) {
                    self.footer = progress;
                    self.dirty = true;
                }
            }
        }

        if self.player.generation() != self.shown_generation {
            self.shown_generation = self.player.generation();
            self.footer = PROGRESS_FALLBACK.to_string();
        }
    }

    pub fn activate(&mut self, action: Action) {
        match action {
            Action::PlayStation(index) => self.play_station(index),
            Action::Run(command) => self.run(command),
        }
    }

    pub fn run(&mut self, command: Command) {
        match command {
            Command::ShowStations => self.pane = Pane::Stations,
            Command::ShowCommands => self.pane = Pane::Commands,
            Command::Skip => {
                let result = self.player.skip();
                self.report(result, Some("Skipping"));
            }
            Command::Pause => {
                let result = self.player.pause();
                self.report(result, Some("Toggled pause"));
            }
            Command::StopStation => {
                let result = self.player.stop_station();
                self.report(result, Some("Station stopped"));
            }
            Command::Refresh => self.dirty = true,
            Command::ThumbsUp => self.feedback(Feedback::ThumbsUp),
            Command::ThumbsDown => self.feedback(Feedback::ThumbsDown),
            Command::BookmarkSong => self.feedback(Feedback::BookmarkSong),
            Command::BookmarkArtist => self.feedback(Feedback::BookmarkArtist),
            Command::Exit => self.should_quit = true,
        }
    }

    fn feedback(&mut self, feedback: Feedback) {
        if self.player.current_track().is_none() {
            self.set_status("Nothing playing");
            return;
        }
        let result = match feedback {
            Feedback::ThumbsUp => self.player.thumbs_up(),
            Feedback::ThumbsDown => self.player.thumbs_down(),
            Feedback::BookmarkSong => self.player.bookmark_song(),
            Feedback::BookmarkArtist => self.player.bookmark_artist(),
        };
        self.report(result, Some(feedback.label()));
    }

    fn play_station(&mut self, index: usize) {
        let Some(config) = self.stations.get(index) else {
            return;
        };
        let name = config.name.clone();
        let station = Box::new(CatalogStation::from_config(config));
        self.pane = Pane::Commands;
        let result = self.player.play_station(station);
        self.report(result, Some(&format!("Tuned in to {}", name)));
    }

    fn report(&mut self, result: Result<()>, ok: Option<&str>) {
        match result {
            Ok(()) => {
                if let Some(msg) = ok {
                    self.set_status(msg);
                }
            }
            Err(e) => {
                warn!(error = %e, "command failed");
                self.set_status(&format!("Error: {}", e));
            }
        }
    }

    // ── Lists ──────────────────────────────────────────────────────

    fn active_list(&mut self) -> (usize, &mut ListState) {
        match self.pane {
            Pane::Stations => (self.station_items.len(), &mut self.station_state),
            Pane::Commands => (self.command_items.len(), &mut self.command_state),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let (len, state) = self.active_list();
        if len == 0 {
            return;
        }
        let current = state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        state.select(Some(next as usize));
    }

    fn selected_action(&self) -> Option<Action> {
        match self.pane {
            Pane::Stations => {
                let item = self.station_items.get(self.station_state.selected()?)?;
                Some(item.on_activate())
            }
            Pane::Commands => {
                let item = self.command_items.get(self.command_state.selected()?)?;
                Some(item.on_activate())
            }
        }
    }
}
