//! Key mapping from terminal events to engine commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};

/// Map keyboard input to engine commands.
///
/// Bare Shift only arrives on terminals with keyboard enhancement enabled;
/// `C` holds everywhere.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::SoftDrop),
        KeyCode::Char(' ') => Some(Command::HardDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Some(Command::RotateClockwise),
        KeyCode::Down | KeyCode::Char('z') | KeyCode::Char('Z') => {
            Some(Command::RotateCounterclockwise)
        }

        // Hold
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
        KeyCode::Char('c')
        | KeyCode::Char('C')
        | KeyCode::Modifier(ModifierKeyCode::LeftShift)
        | KeyCode::Modifier(ModifierKeyCode::RightShift) => Some(Command::Hold),

        // Lifecycle
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc | KeyCode::F(1) => {
            Some(Command::Pause)
        }
        KeyCode::Enter => Some(Command::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Reset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
