//! Analyzer configuration
//!
//! Configuration can be built in code or loaded from a TOML file. The file
//! lives in a platform-specific config directory:
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/keystroke-analyzer/config.toml` |
//! | macOS | `~/Library/Application Support/keystroke-analyzer/config.toml` |
//! | Windows | `%APPDATA%\keystroke-analyzer\config.toml` |
//!
//! ## Resolution
//!
//! The layout and timing used by an analyzer are resolved in a fixed order,
//! each stage a pure function:
//!
//! 1. [`base_layout`] picks the built-in layout for the mode
//! 2. [`select_layout`] lets a custom layout replace it
//! 3. [`get_default_timing_profile`] picks a profile from the speed hint
//! 4. [`apply_timing_profile`] replaces the layout's durations with the profile's
//!
//! ## Example
//!
//! ```no_run
//! use keystroke_analyzer::config::AnalyzerConfig;
//! use keystroke_analyzer::keyboard::KeyboardMode;
//!
//! let mut config = AnalyzerConfig::load().unwrap_or_default();
//! config.keyboard_mode = KeyboardMode::Desktop;
//! config.typing_speed = Some("programmer".to_string());
//! config.save().expect("Failed to save config");
//! ```

use crate::keyboard::{KeyboardMode, LayoutDefinition};
use crate::timing::{apply_timing_profile, get_default_timing_profile, TimingProfile};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default minimum number of capitals typed with caps lock
pub const DEFAULT_CAPS_LOCK_THRESHOLD: usize = 3;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error reading or writing config file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Returns the path to the config file.
///
/// Creates the config directory if it doesn't exist.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let app_dir = config_dir.join("keystroke-analyzer");

    if !app_dir.exists() {
        fs::create_dir_all(&app_dir)?;
    }

    Ok(app_dir.join("config.toml"))
}

/// Options recognized by the keystroke analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Selects the default layout and analysis strategy
    pub keyboard_mode: KeyboardMode,
    /// Minimum capitals in a run (spaces allowed between) typed with caps lock
    pub caps_lock_threshold: usize,
    /// Apply contextual timing adjustments
    pub use_natural_timing: bool,
    /// Speed hint used to select a timing profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typing_speed: Option<String>,
    /// Log every produced sequence at debug level
    pub debug: bool,
    /// Replaces the mode's built-in layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_layout: Option<LayoutDefinition>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            keyboard_mode: KeyboardMode::Mobile,
            caps_lock_threshold: DEFAULT_CAPS_LOCK_THRESHOLD,
            use_natural_timing: true,
            typing_speed: None,
            debug: false,
            custom_layout: None,
        }
    }
}

/// Layout and profile an analyzer runs with
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Layout with the profile's durations applied
    pub layout: LayoutDefinition,
    pub profile: TimingProfile,
}

/// Stage 1: built-in layout for a mode
pub fn base_layout(mode: KeyboardMode) -> LayoutDefinition {
    LayoutDefinition::for_mode(mode)
}

/// Stage 2: a custom layout, when given, replaces the built-in one
pub fn select_layout(mode: KeyboardMode, custom: Option<&LayoutDefinition>) -> LayoutDefinition {
    match custom {
        Some(layout) => layout.clone(),
        None => base_layout(mode),
    }
}

impl AnalyzerConfig {
    /// Config for a mode with every other option at its default
    pub fn for_mode(mode: KeyboardMode) -> Self {
        Self {
            keyboard_mode: mode,
            ..Self::default()
        }
    }

    pub fn with_typing_speed(mut self, hint: impl Into<String>) -> Self {
        self.typing_speed = Some(hint.into());
        self
    }

    pub fn with_caps_lock_threshold(mut self, threshold: usize) -> Self {
        self.caps_lock_threshold = threshold;
        self
    }

    pub fn with_custom_layout(mut self, layout: LayoutDefinition) -> Self {
        self.custom_layout = Some(layout);
        self
    }

    pub fn with_natural_timing(mut self, enabled: bool) -> Self {
        self.use_natural_timing = enabled;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Caps-lock threshold, never below 1
    pub fn effective_caps_lock_threshold(&self) -> usize {
        self.caps_lock_threshold.max(1)
    }

    /// Run the resolution stages in order
    pub fn resolve(&self) -> ResolvedConfig {
        let layout = select_layout(self.keyboard_mode, self.custom_layout.as_ref());
        let profile = get_default_timing_profile(self.keyboard_mode, self.typing_speed.as_deref());
        let layout = apply_timing_profile(&layout, &profile);
        ResolvedConfig { layout, profile }
    }

    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: AnalyzerConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}
