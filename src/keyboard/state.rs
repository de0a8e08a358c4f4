//! Keyboard state carried between analysis calls

use super::KeyboardMode;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of recent characters remembered
pub const HISTORY_CAPACITY: usize = 10;

/// On-screen keyboard layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardView {
    #[default]
    Letters,
    Numbers,
    Symbols,
    Emoji,
}

impl KeyboardView {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Letters => "letters",
            Self::Numbers => "numbers",
            Self::Symbols => "symbols",
            Self::Emoji => "emoji",
        }
    }
}

impl std::fmt::Display for KeyboardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Snapshot of the simulated keyboard.
///
/// The analyzer owns the live instance; callers only ever see clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyboardState {
    /// View that is currently shown
    pub current_view: KeyboardView,
    /// Whether caps lock is engaged
    pub caps_lock_active: bool,
    /// Whether shift was held for the most recent character
    pub shift_active: bool,
    /// Last characters analyzed, oldest first
    pub recent_chars: VecDeque<char>,
    pub mode: KeyboardMode,
}

impl KeyboardState {
    pub fn new(mode: KeyboardMode) -> Self {
        Self {
            current_view: KeyboardView::Letters,
            caps_lock_active: false,
            shift_active: false,
            recent_chars: VecDeque::with_capacity(HISTORY_CAPACITY),
            mode,
        }
    }

    /// Remember a character, evicting the oldest beyond capacity
    pub fn record_char(&mut self, ch: char) {
        self.recent_chars.push_back(ch);
        while self.recent_chars.len() > HISTORY_CAPACITY {
            self.recent_chars.pop_front();
        }
    }

    /// Most recently recorded character
    pub fn last_char(&self) -> Option<char> {
        self.recent_chars.back().copied()
    }

    /// Restore construction-time values, keeping the mode
    pub fn reset(&mut self) {
        self.current_view = KeyboardView::Letters;
        self.caps_lock_active = false;
        self.shift_active = false;
        self.recent_chars.clear();
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new(KeyboardMode::default())
    }
}
