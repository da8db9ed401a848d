use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::snake::Direction::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    Quit,
}

impl Command {
    /// Arrow keys, WASD and HJKL all steer. Esc and CTRL+C quit.
    pub fn from_key_event(ev: &KeyEvent) -> Option<Command> {
        if ev.kind == KeyEventKind::Release {
            return None;
        }

        if is_ctrl_c(ev) {
            return Some(Command::Quit);
        }

        let dir = match ev.code {
            KeyCode::Esc => return Some(Command::Quit),
            KeyCode::Up => Up,
            KeyCode::Down => Down,
            KeyCode::Left => Left,
            KeyCode::Right => Right,
            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' | 'k' => Up,
                's' | 'j' => Down,
                'a' | 'h' => Left,
                'd' | 'l' => Right,
                _ => return None,
            },
            _ => return None,
        };

        Some(Command::Turn(dir))
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.modifiers.contains(KeyModifiers::CONTROL) && matches!(ev.code, KeyCode::Char('c') | KeyCode::Char('C'))
}
