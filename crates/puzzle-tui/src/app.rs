use crate::board::{self, Cursor};
use crate::settings::Settings;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use puzzle_core::catalog::{self, HistoryEntry};
use puzzle_core::puzzles::switch::OptimalTable;
use puzzle_core::{
    ContentStore, DailyGame, DailyRng, DayIndex, MoveOutcome, Optimum, PuzzleKind, SolvedReport,
};
use std::time::Duration;
use tracing::{info, warn};

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Solved report and share text
    Solved,
    /// Help text of the current puzzle
    Help,
    /// Recent days, for loading older puzzles
    History,
}

/// The main application state
pub struct App {
    /// Current game
    pub game: DailyGame,
    /// Currently selected cell
    pub cursor: Cursor,
    /// Selected tool, for puzzles with several kinds of move
    pub tool: usize,
    /// Color theme
    pub theme: Theme,
    /// Persisted settings
    pub settings: Settings,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Optimum, once the background search is done
    pub optimum: Option<Optimum>,
    /// Report of the solved puzzle
    pub report: Option<SolvedReport>,
    /// Help text, or why it could not be loaded
    pub help: String,
    /// History listing, newest first
    pub history: Vec<HistoryEntry>,
    /// Selected history row
    pub history_scroll: usize,
    content: ContentStore,
    switch_table: Option<OptimalTable>,
}

impl App {
    pub fn new(
        game: DailyGame,
        today: DayIndex,
        content: ContentStore,
        switch_table: Option<OptimalTable>,
        settings: Settings,
    ) -> Self {
        let mut app = Self {
            game,
            cursor: Cursor::default(),
            tool: 0,
            theme: settings.theme.theme(),
            settings,
            message: None,
            message_timer: 0,
            screen_state: ScreenState::Playing,
            optimum: None,
            report: None,
            help: String::new(),
            history: catalog::history(today),
            history_scroll: 0,
            content,
            switch_table,
        };
        app.load_help();
        app
    }

    pub fn kind(&self) -> PuzzleKind {
        self.game.kind()
    }

    /// Get the tick rate based on current screen
    pub fn get_tick_rate(&self) -> Duration {
        Duration::from_millis(100)
    }

    /// Update timers and pick up the optimum (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.optimum.is_none() {
            self.optimum = self.game.session_mut().optimum();
        }
        // The title depends on the optimum, which may arrive after the solve
        if self.game.session().is_solved() {
            self.report = self.game.report();
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Playing => self.handle_game_key(key),
            ScreenState::Solved => self.handle_solved_key(key),
            ScreenState::Help => {
                self.screen_state = ScreenState::Playing;
                AppAction::Continue
            }
            ScreenState::History => self.handle_history_key(key),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        let kind = self.kind();
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.moved(kind, -1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.cursor = self.cursor.moved(kind, 1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.cursor = self.cursor.moved(kind, 0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.cursor = self.cursor.moved(kind, 0, 1),

            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.cursor),

            // Tools, or operator buttons directly
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                let tools = board::tools(kind);
                if let Some(name) = tools.get(index) {
                    self.tool = index;
                    self.show_message(&format!("Tool: {}", name));
                } else if kind == PuzzleKind::Operator {
                    self.cursor = Cursor::new(0, index.min(board::dimensions(kind).1 - 1));
                    self.activate(self.cursor);
                }
            }

            // Undo/Redo
            KeyCode::Char('u') => {
                if self.game.session_mut().undo() {
                    self.show_message("Undo");
                }
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if self.game.session_mut().redo() {
                    self.show_message("Redo");
                    self.check_solved();
                }
            }
            KeyCode::Char('R') => {
                if self.game.session_mut().reset() {
                    self.show_message("Reset");
                }
            }

            KeyCode::Char('?') => self.screen_state = ScreenState::Help,
            KeyCode::Char('H') => {
                self.history_scroll = 0;
                self.screen_state = ScreenState::History;
            }
            KeyCode::Char('t') => self.toggle_theme(),

            _ => {}
        }
        AppAction::Continue
    }

    fn handle_solved_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Esc => self.screen_state = ScreenState::Playing,
            KeyCode::Char('H') => {
                self.history_scroll = 0;
                self.screen_state = ScreenState::History;
            }
            KeyCode::Char('t') => self.toggle_theme(),
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_history_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.screen_state = if self.game.session().is_solved() {
                    ScreenState::Solved
                } else {
                    ScreenState::Playing
                };
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.history_scroll = self.history_scroll.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.history.len().saturating_sub(1);
                self.history_scroll = (self.history_scroll + 1).min(max);
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(entry) = self.history.get(self.history_scroll).copied() {
                    self.load_day(entry.day);
                }
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn activate(&mut self, cursor: Cursor) {
        match board::activate(self.game.session_mut(), cursor, self.tool) {
            Some(MoveOutcome::Solved) => self.check_solved(),
            Some(MoveOutcome::Applied) | Some(MoveOutcome::Rejected) | None => {}
        }
    }

    fn check_solved(&mut self) {
        if self.game.session().is_solved() {
            self.report = self.game.report();
            self.screen_state = ScreenState::Solved;
        }
    }

    /// Replace the game with the puzzle of another day
    pub fn load_day(&mut self, day: DayIndex) {
        let kind = catalog::select(day).kind;
        let mut rng = DailyRng::new(day.seed());
        match DailyGame::generate(kind, Some(day), &mut rng, self.switch_table.as_ref()) {
            Ok(game) => {
                info!("switched to day {}", day);
                self.game = game;
                self.cursor = Cursor::default();
                self.tool = 0;
                self.optimum = None;
                self.report = None;
                self.screen_state = ScreenState::Playing;
                self.load_help();
                self.show_message(&format!("Puzzle {}", day));
            }
            Err(err) => {
                warn!("could not load day {}: {}", day, err);
                self.show_message(&format!("Could not load {}: {}", day, err));
            }
        }
    }

    fn load_help(&mut self) {
        self.help = match self.content.help_text(self.kind()) {
            Ok(text) => text,
            Err(err) => format!("Help unavailable: {}", err),
        };
    }

    fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggled();
        self.theme = self.settings.theme.theme();
        self.settings.save();
    }

    /// Moves made so far, in the puzzle's own unit
    pub fn score(&self) -> usize {
        self.game.session().moves_taken()
    }
}
