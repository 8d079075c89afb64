use blockfall_engine::GameSession;
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Text,
};

use crate::{
    input::{self, KeyAction},
    tui::{App, Tui},
    ui::widgets::{SessionDisplay, style},
};

/// Interactive play: keys become engine commands, ticks drive gravity.
#[derive(Debug)]
pub struct PlayApp {
    session: GameSession,
    paused: bool,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            paused: false,
            is_exiting: false,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn is_playing(&self) -> bool {
        !self.paused && !self.session.is_game_over()
    }

    /// Ticks follow the engine's current interval and stop while paused or after game over.
    fn sync_tick_interval(&self, tui: &mut Tui) {
        let interval = self.is_playing().then(|| self.session.tick_interval());
        tui.set_tick_interval(interval);
    }

    fn handle_key(&mut self, action: KeyAction) {
        match action {
            KeyAction::Game(command) if self.is_playing() => _ = self.session.command(command),
            KeyAction::Game(_) => {}
            KeyAction::TogglePause if !self.session.is_game_over() => self.paused = !self.paused,
            KeyAction::TogglePause => {}
            KeyAction::Quit => self.is_exiting = true,
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) {
        self.sync_tick_interval(tui);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        if let Some(action) = input::key_action(&event) {
            self.handle_key(action);
            self.sync_tick_interval(tui);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let snapshot = self.session.snapshot();
        let help_text = if snapshot.is_game_over() {
            "Controls: Q Esc (Quit)"
        } else if self.paused {
            "Controls: P (Resume) | Q Esc (Quit)"
        } else {
            input::HELP_TEXT
        };
        let help_text = Text::from(help_text).style(style::HELP).centered();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        frame.render_widget(
            SessionDisplay::new(&snapshot).paused(self.paused),
            main_area,
        );
        frame.render_widget(help_text, help_area);
    }

    fn update(&mut self, tui: &mut Tui) {
        if self.is_playing() {
            self.session.tick();
        }
        self.sync_tick_interval(tui);
    }
}
