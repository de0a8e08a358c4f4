//! Touch keyboard analysis: view switching before the character key

use super::{CapsLockRun, KeyBuilder};
use crate::keyboard::{CharacterViewIndex, KeyKind, KeyboardState, KeyboardView};
use crate::timing::TimingContext;

/// Push the keys for `ch` on a mobile keyboard
pub(super) fn push_keys(
    builder: &mut KeyBuilder<'_>,
    view_index: &CharacterViewIndex,
    ch: char,
    run: CapsLockRun,
    context: TimingContext,
    state: &mut KeyboardState,
) {
    let target = view_index.view_for(ch);
    if target != state.current_view {
        switch_view(builder, state.current_view, target);
        state.current_view = target;
    }

    let token = key_token(ch);
    if ch.is_ascii_uppercase() {
        builder.uppercase(&token, ch, run, context, state);
    } else {
        builder.character(&token, ch, KeyKind::for_character(ch), context, false);
    }
}

/// Symbols are only reachable from the numbers view, so other views pass through it
fn switch_view(builder: &mut KeyBuilder<'_>, from: KeyboardView, to: KeyboardView) {
    if to == KeyboardView::Symbols && from != KeyboardView::Numbers {
        builder.view_switch(KeyboardView::Numbers);
    }
    builder.view_switch(to);
}

/// Touch keys are labelled by their lowercase character
fn key_token(ch: char) -> String {
    if ch.is_alphabetic() {
        ch.to_lowercase().collect()
    } else {
        ch.to_string()
    }
}
