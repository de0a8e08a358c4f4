//! Key events and the sequences they are grouped into

use super::KeyboardView;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Character recorded as the source of a backspace sequence
pub const BACKSPACE: char = '\u{8}';

/// Kind of physical key pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    Letter,
    Number,
    Symbol,
    Modifier,
    ViewSwitch,
    Space,
    Enter,
    Backspace,
}

impl KeyKind {
    /// Every kind, in declaration order
    pub fn all() -> &'static [KeyKind] {
        &[
            KeyKind::Letter,
            KeyKind::Number,
            KeyKind::Symbol,
            KeyKind::Modifier,
            KeyKind::ViewSwitch,
            KeyKind::Space,
            KeyKind::Enter,
            KeyKind::Backspace,
        ]
    }

    /// Classify the key that produces `ch`.
    ///
    /// Alphabetic characters are letters, ASCII digits are numbers and
    /// everything else is a symbol. Space and newline are handled before
    /// classification by the analyzer.
    pub fn for_character(ch: char) -> Self {
        if ch.is_alphabetic() {
            KeyKind::Letter
        } else if ch.is_ascii_digit() {
            KeyKind::Number
        } else {
            KeyKind::Symbol
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            KeyKind::Letter => "letter",
            KeyKind::Number => "number",
            KeyKind::Symbol => "symbol",
            KeyKind::Modifier => "modifier",
            KeyKind::ViewSwitch => "view_switch",
            KeyKind::Space => "space",
            KeyKind::Enter => "enter",
            KeyKind::Backspace => "backspace",
        }
    }
}

/// One physical key press
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyEvent {
    /// Physical key token (`"shift"`, `"a"`, `"123"`, ...)
    pub key: String,
    /// Character this press contributes to, `None` for modifiers and view switches
    pub character: Option<char>,
    pub kind: KeyKind,
    /// View active when the key is pressed
    pub view: KeyboardView,
    /// Whether the key belongs to a caps-lock run
    pub is_caps_lock: bool,
    /// Press duration in milliseconds
    pub duration_ms: f64,
    /// Position within the parent sequence
    pub sequence_index: usize,
    /// Number of keys in the parent sequence
    pub sequence_length: usize,
}

impl KeyEvent {
    /// Create an event whose position is assigned later by [`KeySequence::new`]
    pub fn new(
        key: impl Into<String>,
        character: Option<char>,
        kind: KeyKind,
        view: KeyboardView,
        duration_ms: f64,
    ) -> Self {
        Self {
            key: key.into(),
            character,
            kind,
            view,
            is_caps_lock: false,
            duration_ms,
            sequence_index: 0,
            sequence_length: 0,
        }
    }

    /// Mark the event as part of a caps-lock run
    pub fn caps_lock(mut self, is_caps_lock: bool) -> Self {
        self.is_caps_lock = is_caps_lock;
        self
    }

    pub fn is_modifier(&self) -> bool {
        self.kind == KeyKind::Modifier
    }

    pub fn is_view_switch(&self) -> bool {
        self.kind == KeyKind::ViewSwitch
    }
}

/// The full physical realization of one character or one backspace
#[derive(Debug, Clone, PartialEq)]
pub struct KeySequence {
    character: char,
    keys: Vec<KeyEvent>,
    is_caps_lock: bool,
}

impl KeySequence {
    /// Build a sequence, numbering its keys in press order.
    ///
    /// Every key's `sequence_index` and `sequence_length` is overwritten here,
    /// since events are created before the final count is known.
    pub fn new(character: char, mut keys: Vec<KeyEvent>, is_caps_lock: bool) -> Self {
        debug_assert!(!keys.is_empty(), "a key sequence needs at least one key");
        let len = keys.len();
        for (i, key) in keys.iter_mut().enumerate() {
            key.sequence_index = i;
            key.sequence_length = len;
        }
        Self {
            character,
            keys,
            is_caps_lock,
        }
    }

    /// Source character, or [`BACKSPACE`] for a backspace sequence
    pub fn character(&self) -> char {
        self.character
    }

    pub fn keys(&self) -> &[KeyEvent] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether the character was typed during a caps-lock run
    pub fn is_caps_lock(&self) -> bool {
        self.is_caps_lock
    }

    pub fn is_backspace(&self) -> bool {
        self.character == BACKSPACE && self.keys.iter().all(|k| k.kind == KeyKind::Backspace)
    }

    /// Sum of every key's duration in milliseconds
    pub fn total_duration(&self) -> f64 {
        self.keys.iter().map(|k| k.duration_ms).sum()
    }

    /// Iterate over the physical key tokens in press order
    pub fn key_tokens(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.key.as_str())
    }
}

// Serialized by hand so the computed total is part of the output
impl Serialize for KeySequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("KeySequence", 4)?;
        state.serialize_field("character", &self.character)?;
        state.serialize_field("keys", &self.keys)?;
        state.serialize_field("is_caps_lock", &self.is_caps_lock)?;
        state.serialize_field("total_duration_ms", &self.total_duration())?;
        state.end()
    }
}
