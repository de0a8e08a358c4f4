//! Named timing presets and profile selection

use crate::keyboard::{DurationTable, KeyboardMode, LayoutDefinition};
use serde::{Deserialize, Serialize};

/// A device and skill archetype: duration table plus contextual coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingProfile {
    pub name: String,
    /// Global speed multiplier applied to every base duration
    pub multiplier: f64,
    /// Durations that replace the layout's own table
    pub durations: DurationTable,
    /// Multiplier for consecutive keys on the same hand (below 1 speeds up)
    pub same_hand_bonus: f64,
    /// Extra milliseconds for hard-to-reach symbols
    pub complex_symbol_penalty: f64,
    /// Extra milliseconds after switching views
    pub view_switch_delay: f64,
    /// Extra milliseconds for engaging or releasing caps lock
    pub caps_lock_transition_delay: f64,
}

impl TimingProfile {
    /// Average phone typist
    pub fn mobile_default() -> Self {
        Self {
            name: "mobile_default".to_string(),
            multiplier: 1.0,
            durations: LayoutDefinition::mobile().durations,
            same_hand_bonus: 0.95,
            complex_symbol_penalty: 25.0,
            view_switch_delay: 40.0,
            caps_lock_transition_delay: 30.0,
        }
    }

    /// Practiced thumb typist
    pub fn mobile_fast() -> Self {
        Self {
            name: "mobile_fast".to_string(),
            multiplier: 0.8,
            durations: DurationTable {
                letter: 95.0,
                number: 110.0,
                symbol: 125.0,
                space: 90.0,
                enter: 115.0,
                modifier: Some(80.0),
                view_switch: Some(90.0),
                backspace: Some(85.0),
            },
            same_hand_bonus: 0.9,
            complex_symbol_penalty: 15.0,
            view_switch_delay: 25.0,
            caps_lock_transition_delay: 20.0,
        }
    }

    /// Careful or hunt-and-peck phone typist
    pub fn mobile_slow() -> Self {
        Self {
            name: "mobile_slow".to_string(),
            multiplier: 1.3,
            durations: DurationTable {
                letter: 150.0,
                number: 170.0,
                symbol: 190.0,
                space: 135.0,
                enter: 170.0,
                modifier: Some(125.0),
                view_switch: Some(145.0),
                backspace: Some(130.0),
            },
            same_hand_bonus: 0.97,
            complex_symbol_penalty: 40.0,
            view_switch_delay: 60.0,
            caps_lock_transition_delay: 45.0,
        }
    }

    /// Tablet on-screen keyboard, typed with more fingers
    pub fn mobile_tablet() -> Self {
        Self {
            name: "mobile_tablet".to_string(),
            multiplier: 0.9,
            durations: DurationTable {
                letter: 105.0,
                number: 120.0,
                symbol: 135.0,
                space: 95.0,
                enter: 125.0,
                modifier: Some(90.0),
                view_switch: Some(100.0),
                backspace: Some(95.0),
            },
            same_hand_bonus: 0.92,
            complex_symbol_penalty: 20.0,
            view_switch_delay: 35.0,
            caps_lock_transition_delay: 25.0,
        }
    }

    /// Average desktop touch typist
    pub fn desktop_default() -> Self {
        Self {
            name: "desktop_default".to_string(),
            multiplier: 1.0,
            durations: LayoutDefinition::desktop().durations,
            same_hand_bonus: 0.9,
            complex_symbol_penalty: 30.0,
            view_switch_delay: 0.0,
            caps_lock_transition_delay: 25.0,
        }
    }

    /// Experienced desktop typist
    pub fn desktop_fast() -> Self {
        Self {
            name: "desktop_fast".to_string(),
            multiplier: 0.75,
            durations: DurationTable {
                letter: 80.0,
                number: 95.0,
                symbol: 105.0,
                space: 70.0,
                enter: 90.0,
                modifier: Some(65.0),
                view_switch: None,
                backspace: Some(75.0),
            },
            same_hand_bonus: 0.85,
            complex_symbol_penalty: 20.0,
            view_switch_delay: 0.0,
            caps_lock_transition_delay: 15.0,
        }
    }

    /// Slow or novice desktop typist
    pub fn desktop_slow() -> Self {
        Self {
            name: "desktop_slow".to_string(),
            multiplier: 1.35,
            durations: DurationTable {
                letter: 125.0,
                number: 145.0,
                symbol: 160.0,
                space: 110.0,
                enter: 135.0,
                modifier: Some(105.0),
                view_switch: None,
                backspace: Some(120.0),
            },
            same_hand_bonus: 0.97,
            complex_symbol_penalty: 45.0,
            view_switch_delay: 0.0,
            caps_lock_transition_delay: 40.0,
        }
    }

    /// Developer who types symbols all day
    pub fn desktop_programmer() -> Self {
        Self {
            name: "desktop_programmer".to_string(),
            multiplier: 0.85,
            durations: DurationTable {
                letter: 85.0,
                number: 95.0,
                symbol: 95.0,
                space: 75.0,
                enter: 90.0,
                modifier: Some(70.0),
                view_switch: None,
                backspace: Some(80.0),
            },
            same_hand_bonus: 0.88,
            complex_symbol_penalty: 10.0,
            view_switch_delay: 0.0,
            caps_lock_transition_delay: 20.0,
        }
    }

    /// Gamer with fast, short key presses
    pub fn desktop_gaming() -> Self {
        Self {
            name: "desktop_gaming".to_string(),
            multiplier: 0.8,
            durations: DurationTable {
                letter: 75.0,
                number: 90.0,
                symbol: 110.0,
                space: 65.0,
                enter: 90.0,
                modifier: Some(60.0),
                view_switch: None,
                backspace: Some(70.0),
            },
            same_hand_bonus: 0.85,
            complex_symbol_penalty: 25.0,
            view_switch_delay: 0.0,
            caps_lock_transition_delay: 15.0,
        }
    }

    /// Every built-in profile
    pub fn builtin() -> Vec<TimingProfile> {
        vec![
            Self::mobile_default(),
            Self::mobile_fast(),
            Self::mobile_slow(),
            Self::mobile_tablet(),
            Self::desktop_default(),
            Self::desktop_fast(),
            Self::desktop_slow(),
            Self::desktop_programmer(),
            Self::desktop_gaming(),
        ]
    }

    /// Look up a built-in profile by its exact name
    pub fn by_name(name: &str) -> Option<TimingProfile> {
        Self::builtin().into_iter().find(|p| p.name == name)
    }
}

/// Pick the profile for a mode and an optional speed hint.
///
/// Hints are matched case-insensitively; unknown or missing hints fall back
/// to the mode's default profile.
///
/// | Mode | Hints |
/// |------|-------|
/// | mobile | `fast`, `slow`/`careful`, `tablet` |
/// | desktop | `fast`, `slow`, `programmer`/`developer`, `gaming` |
pub fn get_default_timing_profile(mode: KeyboardMode, hint: Option<&str>) -> TimingProfile {
    let hint = hint.map(|h| h.trim().to_ascii_lowercase()).unwrap_or_default();

    match mode {
        KeyboardMode::Mobile => match hint.as_str() {
            "fast" => TimingProfile::mobile_fast(),
            "slow" | "careful" => TimingProfile::mobile_slow(),
            "tablet" => TimingProfile::mobile_tablet(),
            _ => TimingProfile::mobile_default(),
        },
        KeyboardMode::Desktop => match hint.as_str() {
            "fast" => TimingProfile::desktop_fast(),
            "slow" => TimingProfile::desktop_slow(),
            "programmer" | "developer" => TimingProfile::desktop_programmer(),
            "gaming" => TimingProfile::desktop_gaming(),
            _ => TimingProfile::desktop_default(),
        },
    }
}

/// Return `layout` with its duration table replaced by the profile's
pub fn apply_timing_profile(layout: &LayoutDefinition, profile: &TimingProfile) -> LayoutDefinition {
    LayoutDefinition {
        durations: profile.durations,
        ..layout.clone()
    }
}
