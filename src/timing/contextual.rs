//! Situational adjustment of base key durations

use super::TimingProfile;

/// Situations that change how long a key press takes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimingContext {
    /// Previous key was pressed by the same hand
    pub same_hand: bool,
    /// Key is a hard-to-reach symbol
    pub complex_symbol: bool,
    /// Key is pressed right after a view switch
    pub view_switch: bool,
    /// Key engages or releases caps lock
    pub caps_lock_transition: bool,
}

impl TimingContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn same_hand(mut self, value: bool) -> Self {
        self.same_hand = value;
        self
    }

    pub fn complex_symbol(mut self, value: bool) -> Self {
        self.complex_symbol = value;
        self
    }

    pub fn view_switch(mut self, value: bool) -> Self {
        self.view_switch = value;
        self
    }

    pub fn caps_lock_transition(mut self, value: bool) -> Self {
        self.caps_lock_transition = value;
        self
    }
}

/// Scale `base_ms` by the profile multiplier, then apply each flag in `context`.
///
/// Same-hand multiplies by the profile's bonus; the other flags add their
/// delay. Flags combine freely.
pub fn calculate_contextual_timing(
    base_ms: f64,
    profile: &TimingProfile,
    context: &TimingContext,
) -> f64 {
    let mut duration = base_ms * profile.multiplier;

    if context.same_hand {
        duration *= profile.same_hand_bonus;
    }
    if context.complex_symbol {
        duration += profile.complex_symbol_penalty;
    }
    if context.view_switch {
        duration += profile.view_switch_delay;
    }
    if context.caps_lock_transition {
        duration += profile.caps_lock_transition_delay;
    }

    duration.max(0.0)
}
