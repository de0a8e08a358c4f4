//! Keystroke analysis engine
//!
//! Turns each character of a text into the physical key presses needed to
//! type it, with a press duration for every key. The analyzer carries a small
//! amount of state between calls (current view, caps lock, recent characters),
//! so characters must be analyzed left to right.
//!
//! # Example
//!
//! ```
//! use keystroke_analyzer::analyzer::KeystrokeAnalyzer;
//! use keystroke_analyzer::config::AnalyzerConfig;
//!
//! let mut analyzer = KeystrokeAnalyzer::new(AnalyzerConfig::default());
//! let text = "Hi 5";
//! for (i, ch) in text.chars().enumerate() {
//!     let seq = analyzer.analyze_character(ch, i, text).unwrap();
//!     assert_eq!(seq.character(), ch);
//! }
//! ```

mod caps_lock;
mod desktop;
mod mobile;
mod position;

pub use caps_lock::{detect_caps_lock_run, CapsLockRun, CapsLockWindow};

use position::{text_key, TextKey, TextPosition};

use crate::config::AnalyzerConfig;
use crate::keyboard::{
    keymap, CharacterViewIndex, KeyEvent, KeyKind, KeySequence, KeyboardMode, KeyboardState,
    KeyboardView, LayoutDefinition, ModifierKeys, BACKSPACE,
};
use crate::timing::{calculate_contextual_timing, TimingContext, TimingProfile};
use log::{debug, trace};
use thiserror::Error;

/// Extra milliseconds for the longer press that engages caps lock
pub const CAPS_LOCK_ON_BUMP_MS: f64 = 20.0;

/// Contract violations by the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzerError {
    /// Index does not point into the text
    #[error("Index {index} is out of bounds for text of {len} characters")]
    IndexOutOfBounds { index: usize, len: usize },
    /// Character does not match the text at the index
    #[error("Expected {expected:?} at index {index}, found {found:?}")]
    CharacterMismatch {
        index: usize,
        expected: char,
        found: char,
    },
    /// Index is not the one following the previous character
    #[error("Index {index} is out of order, expected {expected}")]
    OutOfOrder { index: usize, expected: usize },
}

/// Per-mode character analysis, selected once at construction
#[derive(Debug, Clone)]
enum ModeStrategy {
    Mobile(CharacterViewIndex),
    Desktop,
}

/// Duration lookup bound to one layout and profile
#[derive(Debug, Clone, Copy)]
struct KeyTiming<'a> {
    layout: &'a LayoutDefinition,
    profile: &'a TimingProfile,
    natural: bool,
}

impl KeyTiming<'_> {
    fn duration(&self, kind: KeyKind, context: TimingContext) -> f64 {
        let context = if self.natural { context } else { TimingContext::default() };
        calculate_contextual_timing(self.layout.duration_for(kind), self.profile, &context)
    }
}

/// Collects the keys of one sequence in press order
struct KeyBuilder<'a> {
    timing: KeyTiming<'a>,
    view: KeyboardView,
    keys: Vec<KeyEvent>,
    switched_view: bool,
    used_shift: bool,
}

impl<'a> KeyBuilder<'a> {
    fn new(timing: KeyTiming<'a>, view: KeyboardView) -> Self {
        Self {
            timing,
            view,
            keys: Vec::with_capacity(4),
            switched_view: false,
            used_shift: false,
        }
    }

    fn modifiers(&self) -> &'a ModifierKeys {
        &self.timing.layout.modifiers
    }

    /// Press the key that switches to `target`; the event records the view it was pressed on
    fn view_switch(&mut self, target: KeyboardView) {
        let token = self.timing.layout.view_keys.to(target);
        let duration = self.timing.duration(KeyKind::ViewSwitch, TimingContext::default());
        self.keys.push(KeyEvent::new(token, None, KeyKind::ViewSwitch, self.view, duration));
        trace!("view switch {} -> {}", self.view, target);
        self.view = target;
        self.switched_view = true;
    }

    fn shift(&mut self) {
        let duration = self.timing.duration(KeyKind::Modifier, TimingContext::default());
        let token = &self.modifiers().shift;
        self.keys.push(KeyEvent::new(token.as_str(), None, KeyKind::Modifier, self.view, duration));
        self.used_shift = true;
    }

    fn caps_lock_on(&mut self) {
        let context = TimingContext::new().caps_lock_transition(true);
        let duration = self.timing.duration(KeyKind::Modifier, context) + CAPS_LOCK_ON_BUMP_MS;
        let token = &self.modifiers().caps_lock;
        self.keys.push(
            KeyEvent::new(token.as_str(), None, KeyKind::Modifier, self.view, duration).caps_lock(true),
        );
    }

    fn caps_lock_off(&mut self) {
        let context = TimingContext::new().caps_lock_transition(true);
        let duration = self.timing.duration(KeyKind::Modifier, context);
        let token = &self.modifiers().caps_lock;
        self.keys.push(
            KeyEvent::new(token.as_str(), None, KeyKind::Modifier, self.view, duration).caps_lock(true),
        );
    }

    /// Press the key producing `ch`
    fn character(&mut self, token: &str, ch: char, kind: KeyKind, context: TimingContext, caps: bool) {
        let context = context.view_switch(self.switched_view);
        let duration = self.timing.duration(kind, context);
        self.keys
            .push(KeyEvent::new(token, Some(ch), kind, self.view, duration).caps_lock(caps));
    }

    /// Keys for an uppercase letter, depending on its place in a caps-lock run.
    ///
    /// The first capital of a run only engages caps lock; its letter key is
    /// not pressed. The last capital presses its letter and releases caps lock.
    fn uppercase(
        &mut self,
        token: &str,
        ch: char,
        run: CapsLockRun,
        context: TimingContext,
        state: &mut KeyboardState,
    ) {
        if !run.is_run {
            self.shift();
            self.character(token, ch, KeyKind::Letter, context, false);
        } else if run.is_single() {
            self.caps_lock_on();
            self.character(token, ch, KeyKind::Letter, context, true);
            self.caps_lock_off();
            state.caps_lock_active = false;
        } else if run.is_first {
            self.caps_lock_on();
            state.caps_lock_active = true;
        } else if run.is_last {
            self.character(token, ch, KeyKind::Letter, context, true);
            self.caps_lock_off();
            state.caps_lock_active = false;
        } else {
            self.character(token, ch, KeyKind::Letter, context, true);
        }
    }

    fn finish(self, ch: char, is_caps_lock: bool) -> KeySequence {
        KeySequence::new(ch, self.keys, is_caps_lock)
    }
}

/// Stateful keystroke analyzer for one typing session
#[derive(Debug, Clone)]
pub struct KeystrokeAnalyzer {
    config: AnalyzerConfig,
    layout: LayoutDefinition,
    profile: TimingProfile,
    strategy: ModeStrategy,
    caps_lock_threshold: usize,
    state: KeyboardState,
    /// Index the next character must use
    cursor: usize,
    position: TextPosition,
    /// Last caps-lock window and the text it was found in
    caps_window: Option<(TextKey, CapsLockWindow)>,
}

impl KeystrokeAnalyzer {
    /// Create an analyzer, resolving its layout and timing profile from `config`
    pub fn new(config: AnalyzerConfig) -> Self {
        let resolved = config.resolve();
        let strategy = match config.keyboard_mode {
            KeyboardMode::Mobile => {
                ModeStrategy::Mobile(CharacterViewIndex::from_layout(&resolved.layout))
            }
            KeyboardMode::Desktop => ModeStrategy::Desktop,
        };

        if config.debug {
            debug!(
                "analyzer ready: mode={} layout={} profile={} caps_lock_threshold={}",
                config.keyboard_mode.name(),
                resolved.layout.name,
                resolved.profile.name,
                config.effective_caps_lock_threshold()
            );
        }

        Self {
            caps_lock_threshold: config.effective_caps_lock_threshold(),
            state: KeyboardState::new(config.keyboard_mode),
            layout: resolved.layout,
            profile: resolved.profile,
            strategy,
            config,
            cursor: 0,
            position: TextPosition::default(),
            caps_window: None,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Layout in use, with the profile's durations applied
    pub fn layout(&self) -> &LayoutDefinition {
        &self.layout
    }

    pub fn profile(&self) -> &TimingProfile {
        &self.profile
    }

    pub fn mode(&self) -> KeyboardMode {
        self.config.keyboard_mode
    }

    /// Copy of the current keyboard state
    pub fn get_state(&self) -> KeyboardState {
        self.state.clone()
    }

    /// Return to construction-time state for a new, independent session
    pub fn reset_state(&mut self) {
        self.state.reset();
        self.cursor = 0;
        self.position.clear();
        self.caps_window = None;
    }

    /// Analyze `character`, found at char index `index` of `full_text`.
    ///
    /// Calls must follow the text left to right, one index at a time: the
    /// first call after construction or [`reset_state`](Self::reset_state)
    /// uses index 0, and each backspace moves the expected index back by one.
    /// Feeding the same `full_text` on every call keeps the cost of a call
    /// independent of the text length.
    pub fn analyze_character(
        &mut self,
        character: char,
        index: usize,
        full_text: &str,
    ) -> Result<KeySequence, AnalyzerError> {
        let (byte, found) = self
            .position
            .seek(full_text, index)
            .ok_or_else(|| AnalyzerError::IndexOutOfBounds {
                index,
                len: full_text.chars().count(),
            })?;
        if found != character {
            return Err(AnalyzerError::CharacterMismatch {
                index,
                expected: character,
                found,
            });
        }
        if index != self.cursor {
            return Err(AnalyzerError::OutOfOrder {
                index,
                expected: self.cursor,
            });
        }

        Ok(self.analyze_at(full_text, index, byte, character))
    }

    /// Analyze every character of `text` in order.
    ///
    /// Keyboard state carries over from earlier calls; the cursor restarts at
    /// the beginning of `text` and ends past its last character.
    pub fn analyze_text(&mut self, text: &str) -> Vec<KeySequence> {
        self.cursor = 0;
        self.position.clear();
        self.caps_window = None;
        text.char_indices()
            .enumerate()
            .map(|(index, (byte, ch))| self.analyze_at(text, index, byte, ch))
            .collect()
    }

    /// Keys for deleting one character.
    ///
    /// Always a single backspace press; view and caps lock are left alone.
    pub fn analyze_backspace(&mut self) -> KeySequence {
        let duration = calculate_contextual_timing(
            self.layout.durations.backspace_duration(),
            &self.profile,
            &TimingContext::default(),
        );
        let key = KeyEvent::new(
            self.layout.modifiers.backspace.as_str(),
            None,
            KeyKind::Backspace,
            self.state.current_view,
            duration,
        );
        self.cursor = self.cursor.saturating_sub(1);
        // The retyped text may differ from the one the window was found in
        self.caps_window = None;

        let sequence = KeySequence::new(BACKSPACE, vec![key], false);
        if self.config.debug {
            debug!("backspace: {:.1}ms", sequence.total_duration());
        }
        sequence
    }

    /// Caps-lock classification of `ch`, reusing the window of the previous capital
    fn caps_lock_run(&mut self, text: &str, index: usize, byte: usize, ch: char) -> CapsLockRun {
        if !ch.is_ascii_uppercase() {
            return CapsLockRun::default();
        }

        let key = text_key(text);
        let window = match self.caps_window {
            Some((known, window)) if known == key && window.contains(index) => window,
            _ => {
                let window = CapsLockWindow::around(text, index, byte);
                self.caps_window = Some((key, window));
                window
            }
        };
        window.classify(index, self.caps_lock_threshold)
    }

    fn analyze_at(&mut self, text: &str, index: usize, byte: usize, ch: char) -> KeySequence {
        let run = self.caps_lock_run(text, index, byte, ch);
        let timing = KeyTiming {
            layout: &self.layout,
            profile: &self.profile,
            natural: self.config.use_natural_timing,
        };
        let mut builder = KeyBuilder::new(timing, self.state.current_view);

        let sequence = if ch == ' ' || ch == '\n' {
            let (token, kind) = if ch == ' ' {
                (self.layout.modifiers.space.as_str(), KeyKind::Space)
            } else {
                (self.layout.modifiers.enter.as_str(), KeyKind::Enter)
            };
            builder.character(token, ch, kind, TimingContext::default(), false);
            builder.finish(ch, false)
        } else {
            if run.is_first && self.config.debug {
                debug!(
                    "caps lock run of {} capitals starts at index {}",
                    run.letters, index
                );
            }

            let context = TimingContext::new()
                .same_hand(self.state.last_char().is_some_and(|prev| keymap::same_hand(prev, ch)))
                .complex_symbol(keymap::is_complex_symbol(ch));

            match &self.strategy {
                ModeStrategy::Mobile(view_index) => {
                    mobile::push_keys(&mut builder, view_index, ch, run, context, &mut self.state)
                }
                ModeStrategy::Desktop => {
                    desktop::push_keys(&mut builder, ch, run, context, &mut self.state)
                }
            }

            self.state.shift_active = builder.used_shift;
            builder.finish(ch, run.is_run)
        };

        self.state.record_char(ch);
        self.cursor = index + 1;

        if self.config.debug {
            debug!(
                "{:?}@{}: [{}] {:.1}ms",
                ch,
                index,
                sequence.key_tokens().collect::<Vec<_>>().join(", "),
                sequence.total_duration()
            );
        }

        sequence
    }
}

impl Default for KeystrokeAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}
