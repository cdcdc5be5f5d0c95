//! Character-level Unicode classification for kana output.

/// Check the full Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF). Includes rarely-used symbols
/// (゠ U+30A0, ヿ U+30FF) but no unassigned codepoints.
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// Katakana Phonetic Extensions (U+31F0..U+31FF), small kana such as ㇷ.
pub fn is_katakana_extension(c: char) -> bool {
    ('\u{31F0}'..='\u{31FF}').contains(&c)
}

/// Convert a hiragana string to katakana.
/// Non-hiragana characters (ー, ASCII, etc.) are passed through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if is_hiragana(c) {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Characters in `kana` that are not katakana, in order of appearance.
///
/// Anything returned here is a symbol the pipeline could not map and
/// copied through verbatim.
pub fn fault_chars(kana: &str) -> Vec<char> {
    kana.chars()
        .filter(|&c| !is_katakana(c) && !is_katakana_extension(c))
        .collect()
}

/// Whether `kana` is entirely katakana (the empty string counts).
pub fn is_clean_katakana(kana: &str) -> bool {
    kana.chars()
        .all(|c| is_katakana(c) || is_katakana_extension(c))
}
