//! Physical keyboard analysis: a single view, shift for shifted characters

use super::{CapsLockRun, KeyBuilder};
use crate::keyboard::{keymap, KeyKind, KeyboardState};
use crate::timing::TimingContext;

/// Push the keys for `ch` on a desktop keyboard
pub(super) fn push_keys(
    builder: &mut KeyBuilder<'_>,
    ch: char,
    run: CapsLockRun,
    context: TimingContext,
    state: &mut KeyboardState,
) {
    match keymap::desktop_key(ch) {
        Some(key) if ch.is_ascii_uppercase() => {
            builder.uppercase(key.key, ch, run, context, state);
        }
        Some(key) => {
            if key.requires_shift {
                builder.shift();
            }
            builder.character(key.key, ch, KeyKind::for_character(ch), context, false);
        }
        None => {
            let token: String = ch.to_lowercase().collect();
            builder.character(&token, ch, KeyKind::Letter, context, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzer::KeystrokeAnalyzer;
    use crate::config::AnalyzerConfig;
    use crate::keyboard::{KeyKind, KeyboardMode, KeyboardView};

    fn analyzer() -> KeystrokeAnalyzer {
        KeystrokeAnalyzer::new(AnalyzerConfig::for_mode(KeyboardMode::Desktop))
    }

    fn tokens(analyzer: &mut KeystrokeAnalyzer, text: &str, index: usize) -> Vec<String> {
        let ch = text.chars().nth(index).unwrap();
        analyzer
            .analyze_character(ch, index, text)
            .unwrap()
            .key_tokens()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn lowercase_is_one_key() {
        let mut analyzer = analyzer();
        assert_eq!(tokens(&mut analyzer, "q", 0), ["q"]);
    }

    #[test]
    fn isolated_capital_uses_shift() {
        let mut analyzer = analyzer();
        assert_eq!(tokens(&mut analyzer, "Hi", 0), ["shift", "h"]);
    }

    #[test]
    fn shifted_symbols_press_shift() {
        let mut analyzer = analyzer();
        let text = "!?/";
        assert_eq!(tokens(&mut analyzer, text, 0), ["shift", "1"]);
        assert_eq!(tokens(&mut analyzer, text, 1), ["shift", "/"]);
        assert_eq!(tokens(&mut analyzer, text, 2), ["/"]);
    }

    #[test]
    fn never_switches_views() {
        let mut analyzer = analyzer();
        for seq in analyzer.analyze_text("a1%{") {
            assert!(seq.keys().iter().all(|k| !k.is_view_switch()));
            assert!(seq.keys().iter().all(|k| k.view == KeyboardView::Letters));
        }
        assert_eq!(analyzer.get_state().current_view, KeyboardView::Letters);
    }

    #[test]
    fn caps_lock_run_uses_capslock_key() {
        let mut analyzer = analyzer();
        let seqs = analyzer.analyze_text("ABC");
        let all: Vec<Vec<&str>> = seqs.iter().map(|s| s.key_tokens().collect()).collect();
        assert_eq!(all, vec![vec!["capslock"], vec!["b"], vec!["c", "capslock"]]);
    }

    #[test]
    fn unmapped_falls_back_to_lowercase_letter() {
        let mut analyzer = analyzer();
        let seq = analyzer.analyze_character('\u{00D1}', 0, "\u{00D1}").unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.keys()[0].key, "\u{00F1}");
        assert_eq!(seq.keys()[0].kind, KeyKind::Letter);

        let tab = analyzer.analyze_character('\t', 1, "x\t").unwrap();
        assert_eq!(tab.keys()[0].kind, KeyKind::Letter);
    }

    #[test]
    fn key_kinds_follow_character_class() {
        let mut analyzer = analyzer();
        let seqs = analyzer.analyze_text("a7;");
        assert_eq!(seqs[0].keys()[0].kind, KeyKind::Letter);
        assert_eq!(seqs[1].keys()[0].kind, KeyKind::Number);
        assert_eq!(seqs[2].keys()[0].kind, KeyKind::Symbol);
    }
}
