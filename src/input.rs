use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Phase;
use crate::grid::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    /// Edit the name field.
    Type(char),
    Backspace,
    Start,
    Acknowledge,
    Quit,
    None,
}

/// Translates key presses into commands for the current phase.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        InputHandler
    }

    pub fn handle_key_event(&self, key: KeyEvent, phase: Phase) -> Command {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Command::Quit;
        }
        if key.code == KeyCode::Esc {
            return Command::Quit;
        }

        match phase {
            Phase::Running => match key.code {
                KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                    Command::Turn(Direction::Up)
                }
                KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                    Command::Turn(Direction::Down)
                }
                KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                    Command::Turn(Direction::Left)
                }
                KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                    Command::Turn(Direction::Right)
                }
                _ => Command::None,
            },
            Phase::Idle => match key.code {
                KeyCode::Enter => Command::Start,
                KeyCode::Backspace => Command::Backspace,
                KeyCode::Char(c) if !c.is_control() => Command::Type(c),
                _ => Command::None,
            },
            Phase::GameOver { .. } => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => Command::Acknowledge,
                _ => Command::None,
            },
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
