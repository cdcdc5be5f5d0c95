//! Spelling-keyed corrections applied after phonological rendering.
//!
//! Each [`OverlayRule`] inspects the rendered kana together with the cleaned
//! English spelling and returns a replacement when it fires. Rules run in
//! the fixed order of [`RULES`]; within a rule the first matching case wins,
//! so a word gets at most one prefix and one suffix correction. Long-vowel
//! runs are collapsed last, whether or not any rule fired.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// A spelling-driven rewrite of rendered kana.
pub trait OverlayRule: Sync {
    fn name(&self) -> &'static str;

    /// `spelling` is already cleaned (see [`clean_spelling`]).
    fn apply(&self, kana: &str, spelling: &str) -> Option<String>;
}

/// All rules, in priority order.
pub static RULES: &[&dyn OverlayRule] = &[&WoodRule, &InitialORule, &SuffixRule];

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)|（[^）]*）").expect("valid regex"));

static LONG_VOWEL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ー{2,}").expect("valid regex"));

/// Strip parenthetical annotations, uppercase, and trim surrounding
/// whitespace and punctuation. Inner apostrophes and hyphens are kept.
pub fn clean_spelling(spelling: &str) -> String {
    let stripped = PARENTHETICAL.replace_all(spelling, "");
    stripped
        .trim_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .to_uppercase()
}

/// Collapse every run of two or more `ー` into one.
pub fn collapse_long_vowels(kana: &str) -> String {
    LONG_VOWEL_RUN.replace_all(kana, "ー").trim().to_string()
}

/// Run every rule against `kana`, then collapse long-vowel runs.
pub fn correct(kana: &str, spelling: &str) -> String {
    let spelling = clean_spelling(spelling);
    let mut kana = kana.to_string();
    if !spelling.is_empty() {
        for rule in RULES {
            if let Some(fixed) = rule.apply(&kana, &spelling) {
                trace!(rule = rule.name(), from = %kana, to = %fixed, "overlay");
                kana = fixed;
            }
        }
    }
    collapse_long_vowels(&kana)
}

fn replace_prefix(kana: &str, from: &str, to: &str) -> Option<String> {
    kana.strip_prefix(from).map(|rest| format!("{to}{rest}"))
}

fn replace_suffix(kana: &str, from: &str, to: &str) -> Option<String> {
    kana.strip_suffix(from).map(|head| format!("{head}{to}"))
}

// ---------------------------------------------------------------------------
// WOOD(S)
// ---------------------------------------------------------------------------

/// Restores the small tsu in words built on "wood".
pub struct WoodRule;

impl OverlayRule for WoodRule {
    fn name(&self) -> &'static str {
        "wood"
    }

    fn apply(&self, kana: &str, spelling: &str) -> Option<String> {
        if spelling.starts_with("WOODS") && kana.starts_with("ウドズ") {
            replace_prefix(kana, "ウドズ", "ウッズ")
        } else if (spelling.ends_with("WOODS") || spelling.ends_with("WOOD'S"))
            && kana.ends_with("ウズ")
        {
            replace_suffix(kana, "ウズ", "ウッズ")
        } else if spelling.starts_with("WOOD") && kana.starts_with("ウド") {
            replace_prefix(kana, "ウド", "ウッド")
        } else if spelling.ends_with("WOOD") && kana.ends_with("ウド") {
            replace_suffix(kana, "ウド", "ウッド")
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Initial O
// ---------------------------------------------------------------------------

struct OnsetFix {
    prefixes: &'static [&'static str],
    except_prefixes: &'static [&'static str],
    except_words: &'static [&'static str],
    wrong: &'static str,
    right: &'static str,
}

impl OnsetFix {
    const fn new(
        prefixes: &'static [&'static str],
        wrong: &'static str,
        right: &'static str,
    ) -> Self {
        Self {
            prefixes,
            except_prefixes: &[],
            except_words: &[],
            wrong,
            right,
        }
    }

    const fn except(mut self, prefixes: &'static [&'static str]) -> Self {
        self.except_prefixes = prefixes;
        self
    }

    const fn except_words(mut self, words: &'static [&'static str]) -> Self {
        self.except_words = words;
        self
    }

    fn matches(&self, kana: &str, spelling: &str) -> bool {
        self.prefixes.iter().any(|p| spelling.starts_with(p))
            && !self.except_prefixes.iter().any(|p| spelling.starts_with(p))
            && !self.except_words.contains(&spelling)
            && kana.starts_with(self.wrong)
    }
}

const SON_WORDS: &[&str] = &[
    "SON-OF-A-BITCH",
    "SONS-IN-LAW",
    "SON-IN-LAW",
    "SONNY",
    "SONNY'S",
    "SON'S",
    "SONS'",
    "SONS",
    "SON",
];

const ONSET_FIXES: &[OnsetFix] = &[
    OnsetFix::new(&["CO", "KO"], "カ", "コ"),
    OnsetFix::new(&["GO"], "ガ", "ゴ"),
    OnsetFix::new(&["SO"], "サ", "ソ")
        .except(&["SOMM"])
        .except_words(SON_WORDS),
    OnsetFix::new(&["ZO"], "ザ", "ゾ"),
    OnsetFix::new(&["TO"], "タ", "ト").except(&["TOBACCO"]),
    OnsetFix::new(&["NO"], "ナ", "ノ").except(&["NOTHIN", "NOTHER"]),
    OnsetFix::new(&["HO"], "ハ", "ホ").except(&["HONEY"]),
    OnsetFix::new(&["FO"], "ファ", "フォ"),
    OnsetFix::new(&["BO"], "バ", "ボ"),
    OnsetFix::new(&["PO"], "パ", "ポ"),
    OnsetFix::new(&["MO"], "マ", "モ").except(&["MOTHER"]),
    OnsetFix::new(&["YO"], "ヤ", "ヨ"),
    OnsetFix::new(&["LO", "RO"], "ラ", "ロ").except(&["LOVE"]),
    OnsetFix::new(&["WO"], "ワ", "ウォ").except(&[
        "WORSHIP", "WONDER", "WORLD", "WORST", "WORSE", "WORD", "WORK",
    ]),
];

/// Spelled "o" heard as a mid vowel: rewrite the first syllable to the o-row.
pub struct InitialORule;

impl OverlayRule for InitialORule {
    fn name(&self) -> &'static str {
        "initial-o"
    }

    fn apply(&self, kana: &str, spelling: &str) -> Option<String> {
        // A real OW/OU/OO diphthong already renders correctly.
        let second: String = spelling.chars().skip(1).take(2).collect();
        if ["OW", "OU", "OO"].iter().any(|d| second.starts_with(d)) {
            return None;
        }
        let fix = ONSET_FIXES.iter().find(|f| f.matches(kana, spelling))?;
        replace_prefix(kana, fix.wrong, fix.right)
    }
}

// ---------------------------------------------------------------------------
// Suffixes
// ---------------------------------------------------------------------------

/// a-column kana and its o-column counterpart.
const A_TO_O: &[(char, char)] = &[
    ('カ', 'コ'),
    ('ガ', 'ゴ'),
    ('サ', 'ソ'),
    ('ザ', 'ゾ'),
    ('タ', 'ト'),
    ('ダ', 'ド'),
    ('ナ', 'ノ'),
    ('ハ', 'ホ'),
    ('バ', 'ボ'),
    ('パ', 'ポ'),
    ('マ', 'モ'),
    ('ヤ', 'ヨ'),
    ('ラ', 'ロ'),
    ('ア', 'オ'),
    ('ァ', 'ォ'),
    ('ャ', 'ョ'),
];

/// `-oth(s)` words: move the kana before the final ス/スス to the o-column.
fn round_before_final_s(kana: &str) -> Option<String> {
    let (head, tail) = if let Some(head) = kana.strip_suffix("スス") {
        (head, "スス")
    } else {
        (kana.strip_suffix('ス')?, "ス")
    };
    let mut chars = head.chars();
    let last = chars.next_back()?;
    let rounded = A_TO_O.iter().find(|(a, _)| *a == last).map(|&(_, o)| o)?;
    Some(format!("{}{rounded}{tail}", chars.as_str()))
}

/// Conventional spellings of common English endings.
pub struct SuffixRule;

impl OverlayRule for SuffixRule {
    fn name(&self) -> &'static str {
        "suffix"
    }

    fn apply(&self, kana: &str, spelling: &str) -> Option<String> {
        if spelling.ends_with("ION") {
            replace_suffix(kana, "シャン", "ション")
                .or_else(|| replace_suffix(kana, "ジャン", "ジョン"))
        } else if spelling.ends_with("NG") && kana.ends_with('ン') {
            Some(format!("{kana}グ"))
        } else if spelling.ends_with("ISM") {
            replace_suffix(kana, "イザム", "イズム").or_else(|| replace_suffix(kana, "ザム", "ズム"))
        } else if spelling.ends_with("MENT") {
            replace_suffix(kana, "マント", "メント")
        } else if spelling.ends_with("OTH") || spelling.ends_with("OTHS") {
            round_before_final_s(kana)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_spelling() {
        assert_eq!(clean_spelling("olympics'"), "OLYMPICS");
        assert_eq!(clean_spelling("Read (verb)"), "READ");
        assert_eq!(clean_spelling("son（name）"), "SON");
        assert_eq!(clean_spelling("wood's"), "WOOD'S");
        assert_eq!(clean_spelling("son-in-law"), "SON-IN-LAW");
        assert_eq!(clean_spelling(" (a) "), "");
    }

    #[test]
    fn test_collapse_long_vowels() {
        assert_eq!(collapse_long_vowels("カンソーーシャ"), "カンソーシャ");
        assert_eq!(collapse_long_vowels("カーーー"), "カー");
        assert_eq!(collapse_long_vowels("カー"), "カー");
        assert_eq!(collapse_long_vowels(""), "");
    }

    #[test]
    fn test_no_spelling_only_collapses() {
        assert_eq!(correct("カンソーーシャ", ""), "カンソーシャ");
    }

    #[test]
    fn test_wood_prefix_and_suffix() {
        assert_eq!(correct("ウドランド", "WOODLAND"), "ウッドランド");
        assert_eq!(correct("ドリフトウド", "DRIFTWOOD"), "ドリフトウッド");
        assert_eq!(correct("ウドズタック", "WOODSTOCK"), "ウッズタック");
        assert_eq!(correct("エルウズ", "ELLWOOD'S"), "エルウッズ");
    }

    #[test]
    fn test_wood_inside_word_is_untouched() {
        assert_eq!(correct("バックウズマン", "BACKWOODSMAN"), "バックウズマン");
        assert_eq!(correct("ウディ", "WOODY"), "ウディ");
    }

    #[test]
    fn test_initial_o() {
        assert_eq!(correct("カンソーーシャ", "CONSORTIA"), "コンソーシャ");
        assert_eq!(correct("ファカス", "FOCUS"), "フォカス");
        assert_eq!(correct("ワブル", "WOBBLE"), "ウォブル");
        assert_eq!(correct("ラケト", "ROCKET"), "ロケト");
        assert_eq!(correct("サニト", "SONNET"), "ソニト");
    }

    #[test]
    fn test_initial_o_exceptions() {
        assert_eq!(correct("サン", "SON"), "サン");
        assert_eq!(correct("マザー", "MOTHER"), "マザー");
        assert_eq!(correct("ラブ", "LOVE"), "ラブ");
        assert_eq!(correct("ワーク", "WORK"), "ワーク");
        assert_eq!(correct("タバコ", "TOBACCO"), "タバコ");
        assert_eq!(correct("ハニー", "HONEY"), "ハニー");
    }

    #[test]
    fn test_initial_o_skipped_for_real_diphthong() {
        assert_eq!(correct("パウダーズ", "POWDERS"), "パウダーズ");
        assert_eq!(correct("カウント", "COUNT"), "カウント");
    }

    #[test]
    fn test_suffixes() {
        assert_eq!(correct("ネイシャン", "NATION"), "ネイション");
        assert_eq!(correct("ビジャン", "VISION"), "ビジョン");
        assert_eq!(correct("キン", "KING"), "キング");
        assert_eq!(correct("レイシザム", "RACISM"), "レイシズム");
        assert_eq!(correct("プリザム", "PRISM"), "プリズム");
        assert_eq!(correct("モマント", "MOMENT"), "モメント");
    }

    #[test]
    fn test_oth_suffix() {
        assert_eq!(correct("ビヒーマスス", "BEHEMOTHS"), "ビヒーモスス");
        assert_eq!(correct("ママス", "MAMMOTH"), "マモス");
        assert_eq!(correct("ビヒース", "BEHEMOTH"), "ビヒース");
    }

    #[test]
    fn test_prefix_and_suffix_both_fire() {
        assert_eq!(correct("カレクシャン", "COLLECTION"), "コレクション");
    }
}
