use std::process;

use unicode_width::UnicodeWidthStr;

use gairaigo_core::normalize::ipa_to_arpabet;
use gairaigo_core::unicode::fault_chars;
use gairaigo_core::{Explanation, Transcriber, Transcription};

pub fn convert_cmd(t: &Transcriber<'_>, phonemes: &str, spelling: &str, json: bool) {
    let result = t.transcribe(phonemes, spelling);
    if json {
        print_json(&result);
    } else {
        print_transcription(&result);
    }
}

pub fn ipa_cmd(t: &Transcriber<'_>, ipa: &str, spelling: &str, json: bool) {
    let results = t.transcribe_ipa(ipa, spelling);
    if json {
        print_json(&results);
        return;
    }
    println!("arpabet:    {}", ipa_to_arpabet(ipa));
    for (i, result) in results.iter().enumerate() {
        println!("#{:>2}", i + 1);
        print_transcription(result);
    }
}

pub fn explain_cmd(t: &Transcriber<'_>, phonemes: &str, spelling: &str, json: bool) {
    let result = t.explain(phonemes, spelling);
    if json {
        print_json(&result);
    } else {
        print!("{}", format_text(&result));
    }
}

/// Report unknown symbols, unmapped pre-kana tokens and non-katakana output;
/// exits 1 on any fault.
pub fn check_cmd(t: &Transcriber<'_>, phonemes: &str, spelling: &str) {
    let result = t.explain(phonemes, spelling);
    let faults = fault_chars(&result.final_kana);

    if result.unknown.is_empty() && result.unmapped.is_empty() && faults.is_empty() {
        println!("OK: {}", result.final_kana);
        return;
    }

    println!("FAULT: {}", result.final_kana);
    if !result.unknown.is_empty() {
        println!("  unknown symbols: {}", result.unknown.join(", "));
    }
    if !result.unmapped.is_empty() {
        println!("  unmapped tokens: {}", result.unmapped.join(", "));
    }
    if !faults.is_empty() {
        let chars: String = faults.into_iter().collect();
        println!("  non-katakana:    {chars}");
    }
    process::exit(1);
}

fn print_transcription(result: &Transcription) {
    println!("phonemes:   {}", result.phonemes);
    println!("prekana:    {}", result.prekana);
    println!("phonology:  {}", result.phonology);
    println!("final:      {}", result.final_kana);
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("JSON serialization failed")
    );
}

pub fn format_text(e: &Explanation) -> String {
    let mut out = String::new();
    out.push_str(&format!("phonemes:   {}\n", e.phonemes.join(" ")));
    out.push_str(&format!("clusters:   {}\n", e.clusters.join(" | ")));

    let rows = [
        e.repaired.clone(),
        e.cluster_prekana.clone(),
        e.cluster_kana.clone(),
    ];
    let labels = ["repaired:", "prekana:", "kana:"];
    for (label, line) in labels.iter().zip(align_columns(&rows)) {
        out.push_str(&format!("{label:<12}{}\n", line.trim_end()));
    }

    out.push_str(&format!("phonology:  {}\n", e.phonology));
    out.push_str(&format!("final:      {}\n", e.final_kana));
    if !e.unmapped.is_empty() {
        out.push_str(&format!("unmapped:   {}\n", e.unmapped.join(", ")));
    }
    if !e.unknown.is_empty() {
        out.push_str(&format!("unknown:    {}\n", e.unknown.join(", ")));
    }
    out
}

/// Lay rows out in columns padded to display width, so kana lines up under
/// the ASCII it was rendered from.
pub fn align_columns(rows: &[Vec<String>]) -> Vec<String> {
    let ncols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..ncols)
        .map(|col| {
            rows.iter()
                .filter_map(|r| r.get(col))
                .map(|cell| cell.width())
                .max()
                .unwrap_or(0)
        })
        .collect();

    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (cell, &w) in row.iter().zip(&widths) {
                line.push_str(cell);
                line.push_str(&" ".repeat(w - cell.width() + 2));
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_columns_by_display_width() {
        let rows: Vec<Vec<String>> = vec![
            vec!["K AE ッ".to_string(), "T".to_string()],
            vec!["カッ".to_string(), "ト".to_string()],
        ];
        let lines = align_columns(&rows);
        assert_eq!(lines[0], "K AE ッ  T   ");
        assert_eq!(lines[1], "カッ     ト  ");
        assert_eq!(lines[0].width(), lines[1].width());
    }

    #[test]
    fn test_format_text_aligns_cluster_rows() {
        let t = Transcriber::new(gairaigo_core::KanaTable::global());
        let text = format_text(&t.explain("T IY D T", "TIEDT"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], "repaired:   T IY    T");
        assert_eq!(lines[3], "prekana:    ti -    t");
        assert_eq!(lines[4], "kana:       ティー  ト");
        assert_eq!(lines[6], "final:      ティート");
    }

    #[test]
    fn test_format_text_lists_unknown() {
        let t = Transcriber::new(gairaigo_core::KanaTable::global());
        let text = format_text(&t.explain("K AH QX", ""));
        assert!(text.contains("unknown:    QX\n"));
        assert!(!text.contains("unmapped:"));
    }

    #[test]
    fn test_align_columns_empty() {
        assert!(align_columns(&[]).is_empty());
    }
}
