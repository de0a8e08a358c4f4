//! Character to key mapping tables

use super::{KeyboardView, LayoutDefinition};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Symbols that take noticeably longer to find and press
pub const COMPLEX_SYMBOLS: &[char] = &[
    '@', '#', '$', '%', '^', '&', '*', '+', '=', '{', '}', '\\', '|', '`', '~', '<', '>',
];

pub fn is_complex_symbol(ch: char) -> bool {
    COMPLEX_SYMBOLS.contains(&ch)
}

/// Precomputed character to view lookup for a mobile layout
#[derive(Debug, Clone, Default)]
pub struct CharacterViewIndex {
    views: HashMap<char, KeyboardView>,
}

impl CharacterViewIndex {
    /// Index every character of a layout's views.
    ///
    /// A character present on several views maps to the first in
    /// letters, numbers, symbols, emoji order.
    pub fn from_layout(layout: &LayoutDefinition) -> Self {
        let inventory = &layout.views;
        let views = [
            KeyboardView::Letters,
            KeyboardView::Numbers,
            KeyboardView::Symbols,
            KeyboardView::Emoji,
        ]
        .into_iter()
        .flat_map(|view| inventory.chars(view).chars())
        .filter_map(|ch| inventory.view_of(ch).map(|view| (ch, view)))
        .collect();
        Self { views }
    }

    /// View required to type `ch`, letters when the character is unmapped
    pub fn view_for(&self, ch: char) -> KeyboardView {
        self.views.get(&ch).copied().unwrap_or_default()
    }
}

/// Physical key producing a character on a desktop keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopKey {
    /// Token of the physical key
    pub key: &'static str,
    /// Whether shift must be held
    pub requires_shift: bool,
}

impl DesktopKey {
    const fn plain(key: &'static str) -> Self {
        Self { key, requires_shift: false }
    }

    const fn shifted(key: &'static str) -> Self {
        Self { key, requires_shift: true }
    }
}

const LETTER_KEYS: [&str; 26] = [
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z",
];

const DIGIT_KEYS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Static keymap for a US QWERTY desktop keyboard
pub static DESKTOP_KEYMAP: LazyLock<HashMap<char, DesktopKey>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Letters
    for (i, key) in LETTER_KEYS.iter().enumerate() {
        let offset = i as u8;
        map.insert(char::from(b'a' + offset), DesktopKey::plain(key));
        map.insert(char::from(b'A' + offset), DesktopKey::shifted(key));
    }

    // Number row
    for (i, key) in DIGIT_KEYS.iter().enumerate() {
        map.insert(char::from(b'0' + i as u8), DesktopKey::plain(key));
    }
    map.insert('!', DesktopKey::shifted("1"));
    map.insert('@', DesktopKey::shifted("2"));
    map.insert('#', DesktopKey::shifted("3"));
    map.insert('$', DesktopKey::shifted("4"));
    map.insert('%', DesktopKey::shifted("5"));
    map.insert('^', DesktopKey::shifted("6"));
    map.insert('&', DesktopKey::shifted("7"));
    map.insert('*', DesktopKey::shifted("8"));
    map.insert('(', DesktopKey::shifted("9"));
    map.insert(')', DesktopKey::shifted("0"));
    map.insert('`', DesktopKey::plain("`"));
    map.insert('~', DesktopKey::shifted("`"));
    map.insert('-', DesktopKey::plain("-"));
    map.insert('_', DesktopKey::shifted("-"));
    map.insert('=', DesktopKey::plain("="));
    map.insert('+', DesktopKey::shifted("="));

    // Brackets and backslash
    map.insert('[', DesktopKey::plain("["));
    map.insert('{', DesktopKey::shifted("["));
    map.insert(']', DesktopKey::plain("]"));
    map.insert('}', DesktopKey::shifted("]"));
    map.insert('\\', DesktopKey::plain("\\"));
    map.insert('|', DesktopKey::shifted("\\"));

    // Home row punctuation
    map.insert(';', DesktopKey::plain(";"));
    map.insert(':', DesktopKey::shifted(";"));
    map.insert('\'', DesktopKey::plain("'"));
    map.insert('"', DesktopKey::shifted("'"));

    // Bottom row punctuation
    map.insert(',', DesktopKey::plain(","));
    map.insert('<', DesktopKey::shifted(","));
    map.insert('.', DesktopKey::plain("."));
    map.insert('>', DesktopKey::shifted("."));
    map.insert('/', DesktopKey::plain("/"));
    map.insert('?', DesktopKey::shifted("/"));

    map
});

/// Look up the desktop key for a character
pub fn desktop_key(ch: char) -> Option<DesktopKey> {
    DESKTOP_KEYMAP.get(&ch).copied()
}

/// Hand that presses a key in touch typing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Left,
    Right,
}

/// Hand used for a letter or digit by QWERTY column, `None` for anything else
pub fn hand_for(ch: char) -> Option<Hand> {
    match ch.to_ascii_lowercase() {
        'q' | 'w' | 'e' | 'r' | 't' | 'a' | 's' | 'd' | 'f' | 'g' | 'z' | 'x' | 'c' | 'v'
        | 'b' | '1' | '2' | '3' | '4' | '5' => Some(Hand::Left),
        'y' | 'u' | 'i' | 'o' | 'p' | 'h' | 'j' | 'k' | 'l' | 'n' | 'm' | '6' | '7' | '8'
        | '9' | '0' => Some(Hand::Right),
        _ => None,
    }
}

/// Whether two characters are pressed by the same hand
pub fn same_hand(a: char, b: char) -> bool {
    matches!((hand_for(a), hand_for(b)), (Some(x), Some(y)) if x == y)
}
