use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::mode::Command;

/// How long a key counts as held after its last auto-repeat when the
/// terminal cannot report releases. Must cover the gap between repeats.
pub const HOLD_TIMEOUT: Duration = Duration::from_millis(150);

/// Hold window after the first press of a key, before any repeat has
/// arrived. Must cover the keyboard's initial repeat delay (660 ms on X11).
pub const FIRST_HOLD_TIMEOUT: Duration = Duration::from_millis(700);

/// Paddle keys, sampled as held state once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaddleKey {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
}

impl PaddleKey {
    pub fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') => Some(PaddleKey::LeftUp),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(PaddleKey::LeftDown),
            KeyCode::Up => Some(PaddleKey::RightUp),
            KeyCode::Down => Some(PaddleKey::RightDown),
            _ => None,
        }
    }
}

/// Maps a key press to a discrete command. Up/Down double as menu navigation.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Up => Some(Command::NavigateUp),
        KeyCode::Down => Some(Command::NavigateDown),
        KeyCode::Enter => Some(Command::Confirm),
        KeyCode::Esc => Some(Command::Cancel),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Command::ToggleMusic),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::VolumeUp),
        KeyCode::Char('-') => Some(Command::VolumeDown),
        _ => None,
    }
}

/// Which paddle keys are down in a given frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left_up: bool,
    pub left_down: bool,
    pub right_up: bool,
    pub right_down: bool,
}

#[derive(Clone, Copy, Debug)]
struct Held {
    at: Instant,
    repeating: bool,
}

/// Held-key tracker built from press/repeat/release events.
pub struct KeyState {
    last_seen: HashMap<PaddleKey, Held>,
    release_aware: bool,
}

impl KeyState {
    pub fn new(release_aware: bool) -> Self {
        Self {
            last_seen: HashMap::new(),
            release_aware,
        }
    }

    pub fn record(&mut self, key: &KeyEvent, at: Instant) {
        let Some(paddle_key) = PaddleKey::from_code(key.code) else {
            return;
        };
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                // Without release reports, repeats arrive as presses of a key
                // that is still held.
                let repeating = key.kind == KeyEventKind::Repeat || self.is_down(paddle_key, at);
                self.last_seen.insert(paddle_key, Held { at, repeating });
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&paddle_key);
            }
        }
    }

    pub fn is_down(&self, key: PaddleKey, now: Instant) -> bool {
        match self.last_seen.get(&key) {
            Some(_) if self.release_aware => true,
            Some(held) => {
                let window = if held.repeating {
                    HOLD_TIMEOUT
                } else {
                    FIRST_HOLD_TIMEOUT
                };
                now.saturating_duration_since(held.at) < window
            }
            None => false,
        }
    }

    pub fn sample(&self, now: Instant) -> FrameInput {
        FrameInput {
            left_up: self.is_down(PaddleKey::LeftUp, now),
            left_down: self.is_down(PaddleKey::LeftDown, now),
            right_up: self.is_down(PaddleKey::RightUp, now),
            right_down: self.is_down(PaddleKey::RightDown, now),
        }
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
    }
}
