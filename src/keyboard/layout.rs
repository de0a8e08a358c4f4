//! Keyboard layout definitions
//!
//! A layout describes which characters each view exposes, the tokens of the
//! keys used to change views and apply modifiers, and the base press duration
//! for every kind of key. Layouts are plain immutable data and may be shared
//! between any number of analyzers.

use super::{KeyKind, KeyboardView};
use serde::{Deserialize, Serialize};

/// Backspace duration used when a table defines neither backspace nor modifier
pub const BACKSPACE_FLOOR_MS: f64 = 120.0;

/// Kind of device being simulated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardMode {
    /// Touch keyboard with switchable views
    #[default]
    Mobile,
    /// Physical keyboard with a single view
    Desktop,
}

impl KeyboardMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }
}

/// Built-in layout variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    /// Generic phone keyboard
    Mobile,
    /// iPhone-style keyboard
    Ios,
    /// Android (Gboard-style) keyboard
    Android,
    /// US QWERTY desktop keyboard
    Desktop,
}

impl LayoutVariant {
    pub fn mode(&self) -> KeyboardMode {
        match self {
            Self::Desktop => KeyboardMode::Desktop,
            _ => KeyboardMode::Mobile,
        }
    }

    /// Default variant for a mode
    pub fn for_mode(mode: KeyboardMode) -> Self {
        match mode {
            KeyboardMode::Mobile => Self::Mobile,
            KeyboardMode::Desktop => Self::Desktop,
        }
    }
}

/// Base press durations in milliseconds, by key kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationTable {
    pub letter: f64,
    pub number: f64,
    pub symbol: f64,
    pub space: f64,
    pub enter: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_switch: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backspace: Option<f64>,
}

impl DurationTable {
    /// Duration for a kind of key, applying the table's fallbacks
    pub fn duration_for(&self, kind: KeyKind) -> f64 {
        match kind {
            KeyKind::Letter => self.letter,
            KeyKind::Number => self.number,
            KeyKind::Symbol => self.symbol,
            KeyKind::Space => self.space,
            KeyKind::Enter => self.enter,
            KeyKind::Modifier => self.modifier_duration(),
            KeyKind::ViewSwitch => self.view_switch.unwrap_or_else(|| self.modifier_duration()),
            KeyKind::Backspace => self.backspace_duration(),
        }
    }

    pub fn modifier_duration(&self) -> f64 {
        self.modifier.unwrap_or(self.letter)
    }

    /// Backspace, then modifier, then the fixed floor
    pub fn backspace_duration(&self) -> f64 {
        self.backspace
            .or(self.modifier)
            .unwrap_or(BACKSPACE_FLOOR_MS)
    }
}

/// Characters visible on each view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewInventory {
    pub letters: String,
    pub numbers: String,
    pub symbols: String,
    pub emoji: String,
}

impl ViewInventory {
    pub fn chars(&self, view: KeyboardView) -> &str {
        match view {
            KeyboardView::Letters => &self.letters,
            KeyboardView::Numbers => &self.numbers,
            KeyboardView::Symbols => &self.symbols,
            KeyboardView::Emoji => &self.emoji,
        }
    }

    /// First view (letters, numbers, symbols, emoji) that shows `ch`
    pub fn view_of(&self, ch: char) -> Option<KeyboardView> {
        [
            KeyboardView::Letters,
            KeyboardView::Numbers,
            KeyboardView::Symbols,
            KeyboardView::Emoji,
        ]
        .into_iter()
        .find(|view| self.chars(*view).contains(ch))
    }
}

/// Tokens of the keys that switch to each view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSwitchKeys {
    pub letters: String,
    pub numbers: String,
    pub symbols: String,
    pub emoji: String,
}

impl ViewSwitchKeys {
    /// Token of the key that switches to `view`
    pub fn to(&self, view: KeyboardView) -> &str {
        match view {
            KeyboardView::Letters => &self.letters,
            KeyboardView::Numbers => &self.numbers,
            KeyboardView::Symbols => &self.symbols,
            KeyboardView::Emoji => &self.emoji,
        }
    }
}

impl Default for ViewSwitchKeys {
    fn default() -> Self {
        Self {
            letters: "ABC".to_string(),
            numbers: "123".to_string(),
            symbols: "#+=".to_string(),
            emoji: "emoji".to_string(),
        }
    }
}

/// Tokens of the modifier and whitespace keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierKeys {
    pub shift: String,
    pub caps_lock: String,
    pub space: String,
    pub enter: String,
    pub backspace: String,
}

impl Default for ModifierKeys {
    fn default() -> Self {
        Self {
            shift: "shift".to_string(),
            caps_lock: "caps_lock".to_string(),
            space: "space".to_string(),
            enter: "return".to_string(),
            backspace: "delete".to_string(),
        }
    }
}

/// Complete description of one keyboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDefinition {
    pub name: String,
    #[serde(default)]
    pub views: ViewInventory,
    #[serde(default)]
    pub view_keys: ViewSwitchKeys,
    #[serde(default)]
    pub modifiers: ModifierKeys,
    pub durations: DurationTable,
}

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const MOBILE_EMOJI: &str = "\u{1F600}\u{1F602}\u{1F60A}\u{1F60D}\u{1F622}\u{1F60E}\
\u{1F44D}\u{1F64F}\u{1F389}\u{1F525}\u{2764}\u{2728}";

impl LayoutDefinition {
    /// Built-in layout for a variant
    pub fn variant(variant: LayoutVariant) -> Self {
        match variant {
            LayoutVariant::Mobile => Self::mobile(),
            LayoutVariant::Ios => Self::ios(),
            LayoutVariant::Android => Self::android(),
            LayoutVariant::Desktop => Self::desktop(),
        }
    }

    /// Generic phone keyboard
    pub fn mobile() -> Self {
        Self {
            name: "mobile".to_string(),
            views: ViewInventory {
                letters: format!("{LOWERCASE}{UPPERCASE}"),
                numbers: "1234567890-/:;()$&@\".,?!'".to_string(),
                symbols: "[]{}#%^*+=_\\|~<>`\u{20AC}\u{00A3}\u{00A5}\u{2022}".to_string(),
                emoji: MOBILE_EMOJI.to_string(),
            },
            view_keys: ViewSwitchKeys::default(),
            modifiers: ModifierKeys::default(),
            durations: DurationTable {
                letter: 120.0,
                number: 135.0,
                symbol: 150.0,
                space: 110.0,
                enter: 140.0,
                modifier: Some(100.0),
                view_switch: Some(115.0),
                backspace: Some(105.0),
            },
        }
    }

    /// iPhone-style keyboard
    pub fn ios() -> Self {
        Self {
            name: "ios".to_string(),
            modifiers: ModifierKeys {
                caps_lock: "shift_lock".to_string(),
                ..ModifierKeys::default()
            },
            durations: DurationTable {
                letter: 115.0,
                number: 130.0,
                symbol: 145.0,
                space: 105.0,
                enter: 135.0,
                modifier: Some(95.0),
                view_switch: Some(110.0),
                backspace: Some(100.0),
            },
            ..Self::mobile()
        }
    }

    /// Android (Gboard-style) keyboard
    pub fn android() -> Self {
        Self {
            name: "android".to_string(),
            views: ViewInventory {
                letters: format!("{LOWERCASE}{UPPERCASE},."),
                numbers: "1234567890@#$_&-+()/*\"':;!?".to_string(),
                symbols: "~`|\u{2022}\u{00F7}\u{00D7}\u{00B6}\u{00A3}\u{00A2}\u{20AC}\u{00A5}^\u{00B0}={}\\%[]<>"
                    .to_string(),
                emoji: MOBILE_EMOJI.to_string(),
            },
            view_keys: ViewSwitchKeys {
                letters: "ABC".to_string(),
                numbers: "?123".to_string(),
                symbols: "=\\<".to_string(),
                emoji: "emoji".to_string(),
            },
            modifiers: ModifierKeys {
                shift: "shift".to_string(),
                caps_lock: "caps_lock".to_string(),
                space: "space".to_string(),
                enter: "enter".to_string(),
                backspace: "backspace".to_string(),
            },
            durations: DurationTable {
                letter: 125.0,
                number: 140.0,
                symbol: 155.0,
                space: 115.0,
                enter: 145.0,
                modifier: Some(105.0),
                view_switch: Some(120.0),
                backspace: Some(110.0),
            },
        }
    }

    /// US QWERTY desktop keyboard; everything lives on a single view
    pub fn desktop() -> Self {
        let printable: String = (0x21u8..=0x7E).map(char::from).collect();
        Self {
            name: "desktop".to_string(),
            views: ViewInventory {
                letters: printable,
                ..ViewInventory::default()
            },
            view_keys: ViewSwitchKeys::default(),
            modifiers: ModifierKeys {
                shift: "shift".to_string(),
                caps_lock: "capslock".to_string(),
                space: "space".to_string(),
                enter: "enter".to_string(),
                backspace: "backspace".to_string(),
            },
            durations: DurationTable {
                letter: 95.0,
                number: 110.0,
                symbol: 120.0,
                space: 85.0,
                enter: 105.0,
                modifier: Some(80.0),
                view_switch: None,
                backspace: Some(90.0),
            },
        }
    }

    /// Default layout for a mode
    pub fn for_mode(mode: KeyboardMode) -> Self {
        Self::variant(LayoutVariant::for_mode(mode))
    }

    /// Base duration for a kind of key
    pub fn duration_for(&self, kind: KeyKind) -> f64 {
        self.durations.duration_for(kind)
    }
}

impl Default for LayoutDefinition {
    fn default() -> Self {
        Self::mobile()
    }
}
