//! Integration tests for Keystroke Analyzer
//!
//! These tests drive the public API end to end: configuration, analysis in
//! both keyboard modes, timing profiles and report generation.

use anyhow::Result;
use keystroke_analyzer::analyzer::{AnalyzerError, KeystrokeAnalyzer};
use keystroke_analyzer::config::AnalyzerConfig;
use keystroke_analyzer::keyboard::{
    KeyKind, KeySequence, KeyboardMode, KeyboardState, KeyboardView, LayoutDefinition,
};
use keystroke_analyzer::report::SequenceReport;
use keystroke_analyzer::timing::{calculate_contextual_timing, TimingContext, TimingProfile};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn analyzer(mode: KeyboardMode) -> KeystrokeAnalyzer {
    KeystrokeAnalyzer::new(AnalyzerConfig::for_mode(mode).with_debug(true))
}

/// Analyze `text` one character at a time through the checked entry point
fn type_text(analyzer: &mut KeystrokeAnalyzer, text: &str) -> Result<Vec<KeySequence>> {
    let mut sequences = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        sequences.push(analyzer.analyze_character(ch, i, text)?);
    }
    Ok(sequences)
}

fn tokens(seq: &KeySequence) -> Vec<&str> {
    seq.key_tokens().collect()
}

fn printable_ascii() -> String {
    (0x20u8..0x7f).map(char::from).collect()
}

// ---------------------------------------------------------------------------
// Caps lock
// ---------------------------------------------------------------------------

#[test]
fn caps_lock_run_mobile() -> Result<()> {
    init_logging();
    let mut analyzer = analyzer(KeyboardMode::Mobile);
    let seqs = type_text(&mut analyzer, "HELLO world")?;

    assert_eq!(tokens(&seqs[0]), ["caps_lock"]);
    assert_eq!(tokens(&seqs[1]), ["e"]);
    assert_eq!(tokens(&seqs[2]), ["l"]);
    assert_eq!(tokens(&seqs[3]), ["l"]);
    assert_eq!(tokens(&seqs[4]), ["o", "caps_lock"]);
    assert_eq!(tokens(&seqs[5]), ["space"]);
    assert_eq!(tokens(&seqs[6]), ["w"]);

    for seq in &seqs[..5] {
        assert!(seq.is_caps_lock());
        assert!(seq.keys().iter().all(|k| k.key != "shift"));
    }
    for seq in &seqs[5..] {
        assert!(!seq.is_caps_lock());
    }
    assert!(!analyzer.get_state().caps_lock_active);
    Ok(())
}

#[test]
fn caps_lock_run_desktop() -> Result<()> {
    init_logging();
    let mut analyzer = analyzer(KeyboardMode::Desktop);
    let seqs = type_text(&mut analyzer, "HELLO world")?;

    assert_eq!(tokens(&seqs[0]), ["capslock"]);
    assert_eq!(tokens(&seqs[4]), ["o", "capslock"]);
    assert!(seqs.iter().flat_map(|s| s.keys()).all(|k| k.key != "shift"));
    Ok(())
}

#[test]
fn isolated_capital_uses_shift_in_both_modes() -> Result<()> {
    init_logging();
    for mode in [KeyboardMode::Mobile, KeyboardMode::Desktop] {
        let mut analyzer = analyzer(mode);
        let seqs = type_text(&mut analyzer, "Hi")?;

        assert_eq!(tokens(&seqs[0]), ["shift", "h"], "mode {}", mode.name());
        assert_eq!(seqs[0].keys()[0].kind, KeyKind::Modifier);
        assert!(!seqs[0].is_caps_lock());
        assert_eq!(tokens(&seqs[1]), ["i"]);
        assert!(!analyzer.get_state().caps_lock_active);
    }
    Ok(())
}

#[test]
fn custom_threshold_changes_run_detection() -> Result<()> {
    let config = AnalyzerConfig::default().with_caps_lock_threshold(2);
    let mut analyzer = KeystrokeAnalyzer::new(config);
    let seqs = type_text(&mut analyzer, "OK")?;

    assert_eq!(tokens(&seqs[0]), ["caps_lock"]);
    assert_eq!(tokens(&seqs[1]), ["k", "caps_lock"]);
    Ok(())
}

// ---------------------------------------------------------------------------
// View switching
// ---------------------------------------------------------------------------

#[test]
fn mobile_view_round_trip() -> Result<()> {
    let mut analyzer = analyzer(KeyboardMode::Mobile);
    let seqs = type_text(&mut analyzer, "a1!a")?;

    assert_eq!(tokens(&seqs[0]), ["a"]);
    assert_eq!(tokens(&seqs[1]), ["123", "1"]);
    // '!' lives on the numbers view of the default layout
    assert_eq!(tokens(&seqs[2]), ["!"]);
    assert_eq!(tokens(&seqs[3]), ["ABC", "a"]);
    assert_eq!(analyzer.get_state().current_view, KeyboardView::Letters);
    Ok(())
}

#[test]
fn mobile_symbols_reached_through_numbers() -> Result<()> {
    let mut analyzer = analyzer(KeyboardMode::Mobile);
    let seqs = type_text(&mut analyzer, "a{")?;

    assert_eq!(tokens(&seqs[1]), ["123", "#+=", "{"]);
    let views: Vec<KeyboardView> = seqs[1].keys().iter().map(|k| k.view).collect();
    assert_eq!(
        views,
        [KeyboardView::Letters, KeyboardView::Numbers, KeyboardView::Symbols]
    );
    assert_eq!(analyzer.get_state().current_view, KeyboardView::Symbols);
    Ok(())
}

#[test]
fn desktop_stays_on_one_view() -> Result<()> {
    let mut analyzer = analyzer(KeyboardMode::Desktop);
    let seqs = type_text(&mut analyzer, &printable_ascii())?;

    assert!(seqs.iter().flat_map(|s| s.keys()).all(|k| !k.is_view_switch()));
    assert_eq!(analyzer.get_state().current_view, KeyboardView::Letters);
    Ok(())
}

// ---------------------------------------------------------------------------
// Sequence invariants
// ---------------------------------------------------------------------------

#[test]
fn sequence_invariants_hold_for_printable_ascii() -> Result<()> {
    let text = printable_ascii();
    for mode in [KeyboardMode::Mobile, KeyboardMode::Desktop] {
        let mut analyzer = analyzer(mode);
        for seq in type_text(&mut analyzer, &text)? {
            let sum: f64 = seq.keys().iter().map(|k| k.duration_ms).sum();
            assert_eq!(seq.total_duration(), sum);
            assert!(!seq.is_empty(), "{:?} produced no keys", seq.character());

            for (i, key) in seq.keys().iter().enumerate() {
                assert_eq!(key.sequence_index, i);
                assert_eq!(key.sequence_length, seq.len());
                assert!(key.duration_ms >= 0.0);
            }
        }
    }
    Ok(())
}

#[test]
fn every_printable_character_is_typed_once() -> Result<()> {
    for mode in [KeyboardMode::Mobile, KeyboardMode::Desktop] {
        for ch in printable_ascii().chars().filter(|&c| c != ' ') {
            let mut analyzer = analyzer(mode);
            let text = ch.to_string();
            let seq = analyzer.analyze_character(ch, 0, &text)?;

            let carrying = seq.keys().iter().filter(|k| k.character == Some(ch)).count();
            assert_eq!(carrying, 1, "{:?} in mode {}", ch, mode.name());
        }
    }
    Ok(())
}

#[test]
fn space_and_newline_are_single_events() -> Result<()> {
    for mode in [KeyboardMode::Mobile, KeyboardMode::Desktop] {
        let mut analyzer = analyzer(mode);
        let seqs = type_text(&mut analyzer, "a b\nc")?;
        assert_eq!(seqs[1].len(), 1);
        assert_eq!(seqs[1].keys()[0].kind, KeyKind::Space);
        assert_eq!(seqs[3].len(), 1);
        assert_eq!(seqs[3].keys()[0].kind, KeyKind::Enter);
    }
    Ok(())
}

#[test]
fn analysis_is_deterministic() -> Result<()> {
    let text = "Hello, WORLD 42 {ok}";
    let first = type_text(&mut analyzer(KeyboardMode::Mobile), text)?;
    let second = type_text(&mut analyzer(KeyboardMode::Mobile), text)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn analyze_text_matches_character_calls() -> Result<()> {
    let text = "Type 3 SHOUTED words!";
    let checked = type_text(&mut analyzer(KeyboardMode::Desktop), text)?;
    let whole = analyzer(KeyboardMode::Desktop).analyze_text(text);
    assert_eq!(checked, whole);
    Ok(())
}

// ---------------------------------------------------------------------------
// State management
// ---------------------------------------------------------------------------

#[test]
fn reset_is_idempotent() -> Result<()> {
    let mut analyzer = analyzer(KeyboardMode::Mobile);
    type_text(&mut analyzer, "ABC 1 {")?;

    analyzer.reset_state();
    let once = analyzer.get_state();
    analyzer.reset_state();
    let twice = analyzer.get_state();

    assert_eq!(once, twice);
    assert_eq!(once, KeyboardState::new(KeyboardMode::Mobile));
    Ok(())
}

#[test]
fn reset_starts_an_independent_session() -> Result<()> {
    let mut analyzer = analyzer(KeyboardMode::Mobile);
    let text = "x9";
    let before = type_text(&mut analyzer, text)?;
    analyzer.reset_state();
    let after = type_text(&mut analyzer, text)?;
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn indices_must_follow_the_cursor_exactly() -> Result<()> {
    for mode in [KeyboardMode::Mobile, KeyboardMode::Desktop] {
        let mut analyzer = analyzer(mode);
        let err = analyzer.analyze_character('E', 1, "HELLO").unwrap_err();
        assert_eq!(err, AnalyzerError::OutOfOrder { index: 1, expected: 0 });
        assert!(!analyzer.get_state().caps_lock_active);

        // In-order typing of the same text is unaffected
        let seqs = type_text(&mut analyzer, "HELLO")?;
        assert_eq!(seqs[4].keys().last().map(|k| k.is_caps_lock), Some(true));
        assert!(!analyzer.get_state().caps_lock_active);
    }
    Ok(())
}

#[test]
fn backspace_does_not_touch_keyboard_state() -> Result<()> {
    let mut analyzer = analyzer(KeyboardMode::Mobile);
    type_text(&mut analyzer, "HEL")?;
    let before = analyzer.get_state();

    let seq = analyzer.analyze_backspace();
    assert!(seq.is_backspace());
    assert_eq!(seq.len(), 1);
    assert_eq!(seq.keys()[0].kind, KeyKind::Backspace);
    assert_eq!(seq.keys()[0].view, before.current_view);

    assert_eq!(analyzer.get_state(), before);
    Ok(())
}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

#[test]
fn contextual_timing_scales_with_multiplier() {
    let base = TimingProfile::mobile_default();
    let doubled = TimingProfile {
        multiplier: base.multiplier * 2.0,
        ..base.clone()
    };

    for ms in [0.0, 85.0, 120.0, 150.0] {
        let plain = TimingContext::default();
        assert_eq!(
            calculate_contextual_timing(ms, &doubled, &plain),
            2.0 * calculate_contextual_timing(ms, &base, &plain)
        );

        let hand = TimingContext::new().same_hand(true);
        let a = calculate_contextual_timing(ms, &doubled, &hand);
        let b = 2.0 * calculate_contextual_timing(ms, &base, &hand);
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn additive_flags_never_shorten_a_press() {
    let flags: [fn(TimingContext) -> TimingContext; 3] = [
        |c| c.complex_symbol(true),
        |c| c.view_switch(true),
        |c| c.caps_lock_transition(true),
    ];

    for profile in TimingProfile::builtin() {
        for base in [TimingContext::new(), TimingContext::new().same_hand(true)] {
            let without = calculate_contextual_timing(110.0, &profile, &base);
            for flag in flags {
                let with = calculate_contextual_timing(110.0, &profile, &flag(base));
                assert!(with >= without, "profile {}", profile.name);
            }
        }
    }
}

#[test]
fn typing_speed_hint_changes_durations() -> Result<()> {
    let text = "typing";
    let normal = type_text(&mut analyzer(KeyboardMode::Desktop), text)?;
    let mut slow = KeystrokeAnalyzer::new(
        AnalyzerConfig::for_mode(KeyboardMode::Desktop).with_typing_speed("SLOW"),
    );
    assert_eq!(slow.profile().name, "desktop_slow");
    let slow = type_text(&mut slow, text)?;

    let total = |seqs: &[KeySequence]| seqs.iter().map(|s| s.total_duration()).sum::<f64>();
    assert!(total(&slow) > total(&normal));
    Ok(())
}

#[test]
fn custom_layout_takes_profile_durations() -> Result<()> {
    let mut layout = LayoutDefinition::android();
    layout.durations.letter = 999.0;
    let config = AnalyzerConfig::default().with_custom_layout(layout);
    let analyzer = KeystrokeAnalyzer::new(config);

    assert_eq!(analyzer.layout().name, "android");
    assert_eq!(analyzer.layout().durations, analyzer.profile().durations);
    Ok(())
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn config_file_roundtrip() -> Result<()> {
    let config = AnalyzerConfig::for_mode(KeyboardMode::Desktop)
        .with_typing_speed("programmer")
        .with_caps_lock_threshold(4)
        .with_custom_layout(LayoutDefinition::desktop());

    let path = std::env::temp_dir().join(format!(
        "keystroke-analyzer-test-{}.toml",
        std::process::id()
    ));
    config.save_to(&path)?;
    let loaded = AnalyzerConfig::load_from(&path)?;
    let _ = std::fs::remove_file(&path);

    assert_eq!(loaded, config);
    Ok(())
}

#[test]
fn partial_config_uses_defaults() -> Result<()> {
    let config: AnalyzerConfig = toml::from_str("keyboard_mode = \"desktop\"")?;
    assert_eq!(config.keyboard_mode, KeyboardMode::Desktop);
    assert_eq!(config.caps_lock_threshold, AnalyzerConfig::default().caps_lock_threshold);
    assert!(config.use_natural_timing);
    Ok(())
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[test]
fn report_file_export_json() -> Result<()> {
    let mut analyzer = analyzer(KeyboardMode::Mobile);
    let mut seqs = type_text(&mut analyzer, "NEW 1")?;
    seqs.push(analyzer.analyze_backspace());
    let report = SequenceReport::from_sequences(&seqs);

    assert_eq!(report.summary.characters, 5);
    assert_eq!(report.summary.backspaces, 1);
    assert_eq!(report.summary.caps_lock_runs, 1);

    let path = std::env::temp_dir().join(format!(
        "keystroke-analyzer-report-{}.json",
        std::process::id()
    ));
    report.export_json(&path)?;
    let contents = std::fs::read_to_string(&path)?;
    let _ = std::fs::remove_file(&path);

    let value: serde_json::Value = serde_json::from_str(&contents)?;
    assert_eq!(value["summary"]["characters"], 5);
    assert_eq!(value["sequences"].as_array().map(Vec::len), Some(6));
    assert_eq!(value["sequences"][1]["total_duration_ms"], seqs[1].total_duration());
    Ok(())
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn independent_analyzers_on_separate_threads() -> Result<()> {
    let text = "Parallel SESSIONS 2024";
    let expected = analyzer(KeyboardMode::Mobile).analyze_text(text);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(move || {
                let mut analyzer = KeystrokeAnalyzer::new(AnalyzerConfig::default());
                analyzer.analyze_text(text)
            })
        })
        .collect();

    for handle in handles {
        let seqs = handle
            .join()
            .map_err(|_| anyhow::anyhow!("analyzer thread panicked"))?;
        assert_eq!(seqs, expected);
    }
    Ok(())
}
