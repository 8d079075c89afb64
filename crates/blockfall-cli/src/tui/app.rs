use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// Application driven by [`Tui::run`].
pub trait App {
    /// Called once before the first event. Set the initial tick interval here.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles terminal events (key input, resize, ...).
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Draws the screen after a tick or a terminal event changed something.
    fn draw(&self, frame: &mut Frame);

    /// Advances the game by one tick.
    fn update(&mut self, tui: &mut Tui);
}
