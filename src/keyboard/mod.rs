//! Keyboard model: layouts, keymaps, key events and state

mod event;
mod state;
pub mod keymap;
pub mod layout;

pub use event::{KeyEvent, KeyKind, KeySequence, BACKSPACE};
pub use keymap::{CharacterViewIndex, DesktopKey, DESKTOP_KEYMAP};
pub use layout::{
    DurationTable, KeyboardMode, LayoutDefinition, LayoutVariant, ModifierKeys, ViewInventory,
    ViewSwitchKeys,
};
pub use state::{KeyboardState, KeyboardView, HISTORY_CAPACITY};
