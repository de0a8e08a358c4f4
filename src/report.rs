//! Session summary and export

use crate::keyboard::{KeyKind, KeySequence};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Summary of a typing session
#[derive(Debug, Clone, Serialize)]
pub struct SequenceReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// Summary statistics
    pub summary: SessionSummary,
    /// Physical presses by key kind
    pub keys_by_kind: BTreeMap<KeyKind, usize>,
    /// The analyzed sequences, in order
    pub sequences: Vec<KeySequence>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Library version that produced the report
    pub version: String,
}

/// Session summary statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSummary {
    /// Characters typed (backspaces excluded)
    pub characters: usize,
    pub backspaces: usize,
    /// Physical key presses
    pub total_keys: usize,
    /// Sum of every press duration, in milliseconds
    pub total_duration_ms: f64,
    /// Shift and caps-lock presses
    pub modifier_presses: usize,
    pub view_switches: usize,
    /// Caps-lock runs started
    pub caps_lock_runs: usize,
    /// Mean duration per typed character, in milliseconds
    pub avg_ms_per_character: Option<f64>,
}

impl SessionSummary {
    fn from_sequences(sequences: &[KeySequence]) -> Self {
        let mut summary = Self::default();

        for seq in sequences {
            if seq.is_backspace() {
                summary.backspaces += 1;
            } else {
                summary.characters += 1;
            }
            summary.total_keys += seq.len();
            summary.total_duration_ms += seq.total_duration();

            for key in seq.keys() {
                match key.kind {
                    KeyKind::Modifier => summary.modifier_presses += 1,
                    KeyKind::ViewSwitch => summary.view_switches += 1,
                    _ => {}
                }
            }

            // Caps lock pressed before the character key engages it; after, releases it
            let engages = seq
                .keys()
                .iter()
                .take_while(|k| k.character.is_none())
                .any(|k| k.is_modifier() && k.is_caps_lock);
            if engages {
                summary.caps_lock_runs += 1;
            }
        }

        if summary.characters > 0 {
            summary.avg_ms_per_character = Some(summary.total_duration_ms / summary.characters as f64);
        }

        summary
    }
}

impl SequenceReport {
    /// Build a report from sequences in the order they were produced
    pub fn from_sequences(sequences: &[KeySequence]) -> Self {
        let mut keys_by_kind = BTreeMap::new();
        for key in sequences.iter().flat_map(|s| s.keys()) {
            *keys_by_kind.entry(key.kind).or_insert(0) += 1;
        }

        Self {
            metadata: ReportMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            summary: SessionSummary::from_sequences(sequences),
            keys_by_kind,
            sequences: sequences.to_vec(),
        }
    }

    /// Export report to JSON file
    pub fn export_json(&self, path: &Path) -> std::io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Export report to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Plain-text summary, one sequence per line
    pub fn to_text(&self) -> String {
        let s = &self.summary;
        let mut out = String::new();

        out.push_str("KEYSTROKE REPORT\n");
        out.push_str("================\n\n");
        out.push_str("SUMMARY\n");
        out.push_str(&format!("  Characters:      {}\n", s.characters));
        out.push_str(&format!("  Backspaces:      {}\n", s.backspaces));
        out.push_str(&format!("  Total Keys:      {}\n", s.total_keys));
        out.push_str(&format!("  Total Duration:  {:.1}ms\n", s.total_duration_ms));
        out.push_str(&format!("  Modifiers:       {}\n", s.modifier_presses));
        out.push_str(&format!("  View Switches:   {}\n", s.view_switches));
        out.push_str(&format!("  Caps Lock Runs:  {}\n", s.caps_lock_runs));
        if let Some(avg) = s.avg_ms_per_character {
            out.push_str(&format!("  Avg/Character:   {:.1}ms\n", avg));
        }

        out.push_str("\nKEYS BY KIND\n");
        for kind in KeyKind::all() {
            if let Some(count) = self.keys_by_kind.get(kind) {
                out.push_str(&format!("  {:<12} {}\n", kind.name(), count));
            }
        }

        out.push_str("\nSEQUENCES\n");
        for seq in &self.sequences {
            let tokens: Vec<&str> = seq.key_tokens().collect();
            out.push_str(&format!(
                "  {:<6} {:>8.1}ms  {}\n",
                format!("{:?}", seq.character()),
                seq.total_duration(),
                tokens.join(" + ")
            ));
        }

        out
    }
}
