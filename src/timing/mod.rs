//! Timing profiles and contextual duration adjustment
//!
//! Profiles bundle a duration table with the coefficients used to adjust
//! individual key presses. Selection, merging and adjustment are all pure
//! functions over immutable data.

mod contextual;
mod profile;

pub use contextual::{calculate_contextual_timing, TimingContext};
pub use profile::{apply_timing_profile, get_default_timing_profile, TimingProfile};
