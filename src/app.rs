//! Game loop state for the terminal binary.
//!
//! Owns the session, the effects and the score service, and routes keys to
//! either gameplay intents or the game-over name field.

use std::time::Duration;

use crossterm::event::KeyEvent;

use arcade_tetris::core::GameSession;
use arcade_tetris::input::{
    handle_key_event, handle_name_key, is_interrupt, should_quit, NameEdit, NameField,
};
use arcade_tetris::scores::{
    SaveTarget, ScoreEntry, ScoreService, ScoreSubmission, ScoreUpdate, ValidationError,
};
use arcade_tetris::term::{Effects, HudView};
use arcade_tetris::types::{Intent, DEFAULT_TOP_SCORES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Progress of the one save allowed per game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Invalid(ValidationError),
    Saving,
    Saved(SaveTarget),
    Failed,
}

impl SaveState {
    /// Name entry stays open until a save is under way
    fn accepts_name(self) -> bool {
        matches!(self, SaveState::Idle | SaveState::Invalid(_) | SaveState::Failed)
    }
}

pub struct App {
    pub session: GameSession,
    pub effects: Effects,
    service: Option<ScoreService>,
    pub top_scores: Vec<ScoreEntry>,
    pub db_online: bool,
    pub name: NameField,
    pub save: SaveState,
    status: String,
}

impl App {
    pub fn new(seed: u32, service: Option<ScoreService>) -> Self {
        let app = Self {
            session: GameSession::new(seed),
            effects: Effects::new(),
            service,
            top_scores: Vec::new(),
            db_online: false,
            name: NameField::new(),
            save: SaveState::Idle,
            status: String::new(),
        };
        app.request_top();
        app
    }

    fn request_top(&self) {
        if let Some(service) = &self.service {
            service.request_top(DEFAULT_TOP_SCORES);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if is_interrupt(key) {
            return Flow::Quit;
        }

        if self.session.is_game_over() && self.save.accepts_name() {
            match handle_name_key(key) {
                Some(NameEdit::Insert(c)) => {
                    self.name.push(c);
                }
                Some(NameEdit::Backspace) => {
                    self.name.pop();
                }
                Some(NameEdit::Submit) => self.submit(),
                Some(NameEdit::Cancel) => self.restart(),
                None => {}
            }
        } else if self.session.is_game_over() && key.code == crossterm::event::KeyCode::Esc {
            self.restart();
        } else {
            if should_quit(key) {
                return Flow::Quit;
            }
            if let Some(intent) = handle_key_event(key) {
                if intent == Intent::Restart {
                    self.restart();
                } else {
                    self.session.apply_intent(intent);
                }
            }
        }

        self.drain_events();
        Flow::Continue
    }

    /// Save the final score under the typed name (once per game)
    pub fn submit(&mut self) {
        if !self.session.is_game_over() || !self.save.accepts_name() {
            return;
        }

        let submission = match ScoreSubmission::new(
            self.name.as_str(),
            self.session.score(),
            self.session.level(),
            self.session.lines(),
        ) {
            Ok(s) => s,
            Err(e) => {
                self.save = SaveState::Invalid(e);
                return;
            }
        };

        match &self.service {
            Some(service) => {
                service.request_save(submission);
                self.save = SaveState::Saving;
            }
            None => self.save = SaveState::Failed,
        }
    }

    pub fn restart(&mut self) {
        if !self.session.apply_intent(Intent::Restart) {
            return;
        }
        self.name.clear();
        self.save = SaveState::Idle;
        if let Some(service) = self.service.as_mut() {
            service.discard_pending();
        }
        self.request_top();
        self.drain_events();
    }

    /// Advance by the wall-clock time since the previous tick
    pub fn tick_elapsed(&mut self, elapsed: Duration) {
        self.tick(elapsed_ms(elapsed));
    }

    pub fn tick(&mut self, elapsed_ms: u32) {
        self.session.tick(elapsed_ms);
        self.effects.advance(elapsed_ms);
        self.drain_events();
    }

    fn drain_events(&mut self) {
        for event in self.session.take_events() {
            self.effects.on_event(&event);
        }
    }

    /// Apply finished persistence requests
    pub fn poll_scores(&mut self) {
        let mut refresh = false;
        if let Some(service) = self.service.as_mut() {
            while let Some(update) = service.try_recv() {
                match update {
                    ScoreUpdate::Connection { online } => self.db_online = online,
                    ScoreUpdate::Saved { target: Some(target) } => {
                        self.save = SaveState::Saved(target);
                        refresh = true;
                    }
                    ScoreUpdate::Saved { target: None } => self.save = SaveState::Failed,
                    ScoreUpdate::TopScores(scores) => self.top_scores = scores,
                }
            }
        }
        if refresh {
            self.request_top();
        }
    }

    /// Rebuild the status line shown under the game-over overlay
    pub fn refresh_status(&mut self) {
        self.status.clear();
        match self.save {
            SaveState::Idle => {}
            SaveState::Invalid(e) => self.status.push_str(&e.to_string()),
            SaveState::Saving => self.status.push_str("Saving..."),
            SaveState::Saved(SaveTarget::Remote) => self.status.push_str("Score saved"),
            SaveState::Saved(SaveTarget::Local) => self.status.push_str("Saved locally"),
            SaveState::Failed => self.status.push_str("Save failed"),
        }
    }

    pub fn hud(&self) -> HudView<'_> {
        let name_entry = if self.session.is_game_over() && self.save.accepts_name() {
            Some(self.name.as_str())
        } else {
            None
        };
        HudView {
            db_online: self.db_online,
            top_scores: &self.top_scores,
            name_entry,
            status: if self.status.is_empty() {
                None
            } else {
                Some(self.status.as_str())
            },
        }
    }
}

/// Whole milliseconds in `d`, saturating at `u32::MAX`
pub fn elapsed_ms(d: Duration) -> u32 {
    d.as_millis().min(u32::MAX as u128) as u32
}
