//! Keystroke Analyzer - physical key sequences for typed text
//!
//! Turns each character of a text into the key presses a person would make to
//! type it on a touch keyboard or a desktop keyboard, with a press duration
//! for every key. Durations come from a layout's base table shaped by a
//! timing profile and by context (same hand, complex symbols, view switches,
//! caps-lock transitions).

pub mod analyzer;
pub mod config;
pub mod keyboard;
pub mod report;
pub mod timing;

pub use analyzer::{AnalyzerError, KeystrokeAnalyzer};
pub use config::{AnalyzerConfig, ConfigError};
pub use keyboard::{KeyEvent, KeyKind, KeySequence, KeyboardMode, KeyboardState, KeyboardView};
pub use report::SequenceReport;
pub use timing::{calculate_contextual_timing, TimingContext, TimingProfile};
