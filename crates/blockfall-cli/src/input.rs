//! Key bindings for interactive play.

use blockfall_engine::Command;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

/// What a key press asks the front end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    TogglePause,
    Quit,
}

pub const HELP_TEXT: &str =
    "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ X (Rotate) | P (Pause) | Q Esc (Quit)";

/// Maps a terminal event to a key action. Releases and unbound keys map to `None`.
pub fn key_action(event: &Event) -> Option<KeyAction> {
    event.as_key_event().and_then(key_event_action)
}

fn key_event_action(event: KeyEvent) -> Option<KeyAction> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let action = match event.code {
        KeyCode::Left => KeyAction::Game(Command::MoveLeft),
        KeyCode::Right => KeyAction::Game(Command::MoveRight),
        KeyCode::Down => KeyAction::Game(Command::SoftDrop),
        KeyCode::Up | KeyCode::Char('x' | 'X') => KeyAction::Game(Command::Rotate),
        KeyCode::Char('p' | 'P') => KeyAction::TogglePause,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => KeyAction::Quit,
        _ => return None,
    };
    Some(action)
}
