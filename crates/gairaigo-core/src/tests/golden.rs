use crate::cache::{CachePolicy, TranscriptionCache};
use crate::settings::{parse_settings_toml, DEFAULT_SETTINGS_TOML};
use crate::transcribe::Transcriber;
use crate::unicode::is_clean_katakana;

use super::default_transcriber;

// ---------------------------------------------------------------------------
// End-to-end cases: phonemes + spelling → final kana
// ---------------------------------------------------------------------------

const GOLDEN: &[(&str, &str, &str)] = &[
    ("B IH HH IY M AH TH S", "BEHEMOTHS", "ビヒーモスス"),
    ("T IY D T", "TIEDT", "ティート"),
    ("P AW D ER Z", "POWDERS", "パウダーズ"),
    ("OW L IH M P IH K S", "OLYMPICS'", "オリンピックス"),
    ("K AH N S AO R SH AH", "CONSORTIA", "コンソーシャ"),
];

#[test]
fn test_golden_cases() {
    let t = default_transcriber();
    for &(phonemes, spelling, expected) in GOLDEN {
        let got = t.transcribe(phonemes, spelling);
        assert_eq!(
            got.final_kana, expected,
            "mismatch: phonemes={phonemes:?}, spelling={spelling:?}, prekana={:?}",
            got.prekana
        );
        assert!(is_clean_katakana(&got.final_kana));
    }
}

#[test]
fn test_golden_cases_with_stress_digits() {
    let t = default_transcriber();
    let got = t.transcribe("B IH0 HH IY1 M AH0 TH S", "behemoths");
    assert_eq!(got.final_kana, "ビヒーモスス");
}

#[test]
fn test_golden_intermediate_stages() {
    let t = default_transcriber();

    let behemoths = t.transcribe("B IH HH IY M AH TH S", "BEHEMOTHS");
    assert_eq!(behemoths.prekana, "bi hi - ma s s");
    assert_eq!(behemoths.phonology, "ビヒーマスス");

    let olympics = t.transcribe("OW L IH M P IH K S", "OLYMPICS");
    assert_eq!(olympics.prekana, "o li nn pi x k s");
    assert_eq!(olympics.phonology, olympics.final_kana);

    let consortia = t.transcribe("K AH N S AO R SH AH", "CONSORTIA");
    assert_eq!(consortia.prekana, "ka n so - r sya");
    assert_eq!(consortia.phonology, "カンソーシャ");
}

#[test]
fn test_golden_cases_through_settings_and_cache() {
    let settings = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
    let transcriber = Transcriber::from_settings(&settings);
    let mut cache = TranscriptionCache::new(transcriber, settings.cache.policy());
    for _ in 0..2 {
        for &(phonemes, spelling, expected) in GOLDEN {
            assert_eq!(cache.transcribe(phonemes, spelling).final_kana, expected);
        }
    }
    let [renderings, finals, _] = cache.stats();
    assert_eq!(renderings.misses, GOLDEN.len() as u64);
    assert_eq!(finals.hits, GOLDEN.len() as u64);
}

#[test]
fn test_small_fifo_cache_still_correct() {
    let mut cache = TranscriptionCache::new(default_transcriber(), CachePolicy::Fifo(2));
    for &(phonemes, spelling, expected) in GOLDEN.iter().chain(GOLDEN) {
        assert_eq!(cache.transcribe(phonemes, spelling).final_kana, expected);
    }
    assert!(cache.stats().iter().all(|s| s.len <= 2));
}

#[test]
fn test_ipa_end_to_end() {
    let t = default_transcriber();
    let out = t.transcribe_ipa("ˈpɪk", "PICK");
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].phonemes, "P IH K");
    assert_eq!(out[0].final_kana, "ピック");
}

#[test]
fn test_long_o_and_glide_onsets() {
    let t = default_transcriber();
    let cases = [
        ("HH OW M", "HOME", "ホーム"),
        ("G OW", "GO", "ゴー"),
        ("SH W AA", "SCHWA", "シュワ"),
        ("JH W AA N", "JUAN", "ジュワン"),
    ];
    for (phonemes, spelling, expected) in cases {
        assert_eq!(t.transcribe(phonemes, spelling).final_kana, expected, "{spelling}");
    }
}

#[test]
fn test_table_keys_as_input_stay_visible() {
    let t = default_transcriber();
    for input in ["K AE x", "ka", "B IY -", "NN", "TS IY"] {
        let kana = t.transcribe(input, "").final_kana;
        assert!(!is_clean_katakana(&kana), "{input} -> {kana}");
        assert!(!kana.ends_with('ッ'), "{input} -> {kana}");
    }
}
