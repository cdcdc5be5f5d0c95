//! Phonetic normalization: IPA or ARPAbet text in, phoneme tokens out.
//!
//! ARPAbet input only needs tokenizing. IPA input goes through
//! [`ipa_to_arpabet`] first: multi-codepoint units are swapped for reserved
//! placeholders, the string is NFKD-decomposed, and every remaining
//! character is mapped on its own.

use unicode_normalization::UnicodeNormalization;

use crate::phoneme::Phoneme;

/// First code point of the Private Use Area block used for placeholders.
const PLACEHOLDER_BASE: u32 = 0xE000;

/// Units that must be replaced before decomposition splits them apart.
/// Order matters: tied affricates before bare ones.
const UNITS: &[(&str, &str)] = &[
    // Rhotic-hooked vowels
    ("ə\u{02DE}", "ER"),
    ("ɜ\u{02DE}", "ER"),
    // Diphthongs
    ("aʊ", "AW"),
    ("aɪ", "AY"),
    ("eɪ", "EY"),
    ("oʊ", "OW"),
    ("ɔɪ", "OY"),
    ("əʊ", "OW"),
    // Affricates
    ("t\u{0361}ʃ", "CH"),
    ("tʃ", "CH"),
    ("d\u{0361}ʒ", "JH"),
    ("dʒ", "JH"),
    // Nasalized taps
    ("ɾ\u{0303}", "N T"),
    ("ɽ\u{0303}", "N AH"),
    // Palatal fricative, precomposed and decomposed
    ("\u{00E7}", "HH"),
    ("c\u{0327}", "HH"),
    // Syllabic consonants
    ("l\u{0329}", "AH L"),
    ("m\u{0329}", "AH M"),
    ("n\u{0329}", "AH N"),
];

/// Deleted before anything else.
const STRIPPED: &[char] = &['\u{02B0}', '\u{1D4A}', '\u{027B}', '\u{02C0}'];

/// Symbol that separates pronunciation variants in normalized output.
pub const VARIANT_SEPARATOR: &str = ";";

fn placeholder(index: usize) -> char {
    char::from_u32(PLACEHOLDER_BASE + index as u32).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn unit_for_placeholder(c: char) -> Option<&'static str> {
    let offset = (c as u32).checked_sub(PLACEHOLDER_BASE)? as usize;
    UNITS.get(offset).map(|&(_, arpa)| arpa)
}

/// Per-character IPA table. `Some("")` means the character is dropped.
fn map_char(c: char) -> Option<&'static str> {
    let mapped = match c {
        // Vowels
        'a' | 'æ' => "AE",
        'ɑ' => "AA",
        'ɒ' => "OH",
        'ɐ' | 'ʌ' | 'ɯ' | 'ə' => "AH",
        'ɔ' | 'o' => "AO",
        'ɚ' | 'ɝ' | 'ɜ' => "ER",
        'e' | 'ɛ' => "EH",
        'ɪ' | 'ɨ' => "IH",
        'i' => "IY",
        'ʊ' | 'ʋ' => "UH",
        'u' | 'ʉ' => "UW",
        '\u{0303}' => "N",
        // Vowels from other languages
        'ɞ' | 'ø' | 'ɵ' | 'œ' => "AH",
        'y' => "Y UW",
        'ʏ' => "UW",
        'ɘ' => "EH",
        // Consonants
        'b' | 'ɓ' => "B",
        'ʙ' => "B R R",
        'c' | 'k' | 'q' => "K",
        'ɕ' | 'h' | 'ɦ' | 'x' | 'χ' | 'ʑ' => "HH",
        'd' => "D",
        'ð' => "DH",
        'ɾ' | 't' | 'ʈ' => "T",
        'f' | 'ɸ' => "F",
        'ɡ' | 'g' => "G",
        'l' | 'ɫ' | 'ɬ' | 'ɭ' => "L",
        'm' | 'ɱ' => "M",
        'n' => "N",
        'ŋ' => "NG",
        'ɲ' => "N Y",
        'p' => "P",
        'ʔ' => "",
        'r' | 'ɹ' | 'ʀ' | 'ʁ' | 'ɽ' | '\u{02DE}' => "R",
        's' => "S",
        'ʃ' => "SH",
        'θ' => "TH",
        'v' => "V",
        'w' | 'ɥ' => "W",
        'ʍ' => "HH W",
        'j' => "Y",
        'z' => "Z",
        'ʒ' => "ZH",
        // Prosody: stress, length, tone, linking and diacritics
        'ˈ' | 'ˌ' | '.' | 'ˑ' | 'ː' => "",
        '\u{0263}' | '\u{02BC}' | '\u{02C1}' | '\u{02E5}' | '\u{02E7}' | '\u{02E9}' => "",
        '\u{203F}' | '\u{035C}' | '\u{0361}' | '\u{0329}' | '\u{032F}' | '\u{030C}' => "",
        '\u{031A}' | '\u{032A}' | '\u{0308}' | '\u{032C}' | '\u{0306}' | '\u{0320}' => "",
        '\u{0302}' | '\u{0330}' | '\u{0304}' | '\u{031E}' | '\u{0325}' | '\u{0319}' => "",
        '\u{031D}' | '\u{0347}' | '\u{0301}' => "",
        // Punctuation
        '\'' | '-' => "",
        ';' | ',' | '~' | '⁓' => VARIANT_SEPARATOR,
        c if c.is_whitespace() => "",
        c => return unit_for_placeholder(c),
    };
    Some(mapped)
}

/// Convert an IPA transcription into space-separated ARPAbet symbols.
///
/// Characters with no mapping are copied through unchanged so they remain
/// visible downstream. Variant separators come out as `;` tokens; use
/// [`split_variants`] before transcribing.
pub fn ipa_to_arpabet(ipa: &str) -> String {
    if ipa.is_empty() {
        return String::new();
    }

    let mut s: String = ipa.chars().filter(|c| !STRIPPED.contains(c)).collect();
    for (i, (unit, _)) in UNITS.iter().enumerate() {
        if s.contains(unit) {
            s = s.replace(unit, &placeholder(i).to_string());
        }
    }

    let mut symbols: Vec<String> = Vec::new();
    for c in s.nfkd() {
        match map_char(c) {
            Some("") => {}
            Some(mapped) => symbols.push(mapped.to_string()),
            None => symbols.push(c.to_string()),
        }
    }
    symbols.join(" ")
}

/// Split a normalized string into its pronunciation variants.
pub fn split_variants(s: &str) -> Vec<String> {
    s.split([';', ',', '~', '⁓'])
        .map(|v| v.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|v| !v.is_empty())
        .collect()
}

/// Tokenize an ARPAbet string. Stress digits are stripped; unknown symbols
/// are kept as [`Phoneme::Unknown`].
pub fn parse_phonemes(arpabet: &str) -> Vec<Phoneme> {
    arpabet.split_whitespace().map(Phoneme::from_symbol).collect()
}

/// Re-serialize an ARPAbet string in canonical form: single spaces, upper
/// case, no stress digits.
pub fn canonical(arpabet: &str) -> String {
    parse_phonemes(arpabet)
        .iter()
        .map(Phoneme::symbol)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_phonemes_with_stress() {
        let p = parse_phonemes("B IH0 HH IY1 M AH0 TH S");
        assert_eq!(
            p,
            vec![
                Phoneme::B,
                Phoneme::IH,
                Phoneme::HH,
                Phoneme::IY,
                Phoneme::M,
                Phoneme::AH,
                Phoneme::TH,
                Phoneme::S
            ]
        );
        assert_eq!(p, parse_phonemes("B IH HH IY M AH TH S"));
    }

    #[test]
    fn test_parse_phonemes_empty() {
        assert!(parse_phonemes("").is_empty());
        assert!(parse_phonemes("   ").is_empty());
    }

    #[test]
    fn test_canonical() {
        assert_eq!(canonical("  k ae1  t "), "K AE T");
        assert_eq!(canonical(""), "");
    }

    #[test]
    fn test_ipa_simple() {
        assert_eq!(ipa_to_arpabet("kæt"), "K AE T");
        assert_eq!(ipa_to_arpabet("ˈhɒt"), "HH OH T");
    }

    #[test]
    fn test_ipa_affricates_and_length() {
        assert_eq!(ipa_to_arpabet("ˈtʃɜːtʃ"), "CH ER CH");
        assert_eq!(ipa_to_arpabet("ˈt͡ʃɜːt͡ʃ"), "CH ER CH");
        assert_eq!(ipa_to_arpabet("dʒæm"), "JH AE M");
    }

    #[test]
    fn test_ipa_diphthongs() {
        assert_eq!(ipa_to_arpabet("ˈfɹaɪdeɪ"), "F R AY D EY");
        assert_eq!(ipa_to_arpabet("ɡəʊ"), "G OW");
    }

    #[test]
    fn test_ipa_syllabic_consonant() {
        assert_eq!(ipa_to_arpabet("ˈbʌtl\u{0329}"), "B AH T AH L");
    }

    #[test]
    fn test_ipa_palatal_fricative_both_forms() {
        assert_eq!(ipa_to_arpabet("\u{00E7}"), "HH");
        assert_eq!(ipa_to_arpabet("c\u{0327}"), "HH");
    }

    #[test]
    fn test_ipa_rhotic_hook() {
        assert_eq!(ipa_to_arpabet("bə\u{02DE}d"), "B ER D");
    }

    #[test]
    fn test_ipa_nasalized_vowel() {
        assert_eq!(ipa_to_arpabet("bɑ\u{0303}"), "B AA N");
    }

    #[test]
    fn test_ipa_aspiration_stripped() {
        assert_eq!(ipa_to_arpabet("pʰɪn"), "P IH N");
    }

    #[test]
    fn test_ipa_unmapped_passes_through() {
        assert_eq!(ipa_to_arpabet("kæ@"), "K AE @");
    }

    #[test]
    fn test_ipa_empty() {
        assert_eq!(ipa_to_arpabet(""), "");
    }

    #[test]
    fn test_ipa_variants() {
        let arpa = ipa_to_arpabet("ɡʊd, ɡʊt");
        assert_eq!(arpa, "G UH D ; G UH T");
        assert_eq!(split_variants(&arpa), vec!["G UH D", "G UH T"]);
    }

    #[test]
    fn test_split_variants_drops_empty() {
        assert_eq!(split_variants("K AE T;;"), vec!["K AE T"]);
        assert!(split_variants("").is_empty());
    }
}
