//! The closed phoneme alphabet and its static lookup tables.
//!
//! Symbols follow ARPAbet (the CMU dictionary inventory) with one addition,
//! `OH` for the British short o /ɒ/, and four fused units produced by the
//! clusterer (`TS`, `NP`, `NB`, `NN`). Anything else survives as
//! [`Phoneme::Unknown`] so it shows up verbatim in the output.

use std::fmt;

/// Phoneme class used by clustering and repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Vowel,
    Semivowel,
    Consonant,
    /// Fused digraph units: TS, NP, NB, NN.
    Special,
    Unknown,
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Phoneme {
    // Vowels
    AA,
    AE,
    AH,
    AO,
    AW,
    AY,
    EH,
    ER,
    EY,
    IH,
    IY,
    OH,
    OW,
    OY,
    UH,
    UW,
    // Semivowels
    W,
    Y,
    // Consonants
    B,
    CH,
    D,
    DH,
    F,
    G,
    HH,
    JH,
    K,
    L,
    M,
    N,
    NG,
    P,
    R,
    S,
    SH,
    T,
    TH,
    V,
    Z,
    ZH,
    // Fused units
    TS,
    NP,
    NB,
    NN,
    /// A symbol outside the alphabet, kept as written (stress digits removed).
    Unknown(String),
}

impl Phoneme {
    /// Every symbol a phoneme string may contain, fused units excluded.
    pub const INPUT_ALPHABET: [Phoneme; 40] = [
        Phoneme::AA,
        Phoneme::AE,
        Phoneme::AH,
        Phoneme::AO,
        Phoneme::AW,
        Phoneme::AY,
        Phoneme::EH,
        Phoneme::ER,
        Phoneme::EY,
        Phoneme::IH,
        Phoneme::IY,
        Phoneme::OH,
        Phoneme::OW,
        Phoneme::OY,
        Phoneme::UH,
        Phoneme::UW,
        Phoneme::W,
        Phoneme::Y,
        Phoneme::B,
        Phoneme::CH,
        Phoneme::D,
        Phoneme::DH,
        Phoneme::F,
        Phoneme::G,
        Phoneme::HH,
        Phoneme::JH,
        Phoneme::K,
        Phoneme::L,
        Phoneme::M,
        Phoneme::N,
        Phoneme::NG,
        Phoneme::P,
        Phoneme::R,
        Phoneme::S,
        Phoneme::SH,
        Phoneme::T,
        Phoneme::TH,
        Phoneme::V,
        Phoneme::Z,
        Phoneme::ZH,
    ];

    /// Parse one token. Trailing stress digits are dropped and case is ignored;
    /// anything not in the input alphabet becomes `Unknown`. Fused units are
    /// only ever built by the clusterer, so `TS` or `NN` in input is unknown.
    pub fn from_symbol(token: &str) -> Phoneme {
        let bare = token.trim_end_matches(|c: char| c.is_ascii_digit());
        let upper = bare.to_ascii_uppercase();
        match upper.as_str() {
            "AA" => Phoneme::AA,
            "AE" => Phoneme::AE,
            "AH" => Phoneme::AH,
            "AO" => Phoneme::AO,
            "AW" => Phoneme::AW,
            "AY" => Phoneme::AY,
            "EH" => Phoneme::EH,
            "ER" => Phoneme::ER,
            "EY" => Phoneme::EY,
            "IH" => Phoneme::IH,
            "IY" => Phoneme::IY,
            "OH" => Phoneme::OH,
            "OW" => Phoneme::OW,
            "OY" => Phoneme::OY,
            "UH" => Phoneme::UH,
            "UW" => Phoneme::UW,
            "W" => Phoneme::W,
            "Y" => Phoneme::Y,
            "B" => Phoneme::B,
            "CH" => Phoneme::CH,
            "D" => Phoneme::D,
            "DH" => Phoneme::DH,
            "F" => Phoneme::F,
            "G" => Phoneme::G,
            "HH" => Phoneme::HH,
            "JH" => Phoneme::JH,
            "K" => Phoneme::K,
            "L" => Phoneme::L,
            "M" => Phoneme::M,
            "N" => Phoneme::N,
            "NG" => Phoneme::NG,
            "P" => Phoneme::P,
            "R" => Phoneme::R,
            "S" => Phoneme::S,
            "SH" => Phoneme::SH,
            "T" => Phoneme::T,
            "TH" => Phoneme::TH,
            "V" => Phoneme::V,
            "Z" => Phoneme::Z,
            "ZH" => Phoneme::ZH,
            _ => Phoneme::Unknown(bare.to_string()),
        }
    }

    pub fn symbol(&self) -> &str {
        match self {
            Phoneme::AA => "AA",
            Phoneme::AE => "AE",
            Phoneme::AH => "AH",
            Phoneme::AO => "AO",
            Phoneme::AW => "AW",
            Phoneme::AY => "AY",
            Phoneme::EH => "EH",
            Phoneme::ER => "ER",
            Phoneme::EY => "EY",
            Phoneme::IH => "IH",
            Phoneme::IY => "IY",
            Phoneme::OH => "OH",
            Phoneme::OW => "OW",
            Phoneme::OY => "OY",
            Phoneme::UH => "UH",
            Phoneme::UW => "UW",
            Phoneme::W => "W",
            Phoneme::Y => "Y",
            Phoneme::B => "B",
            Phoneme::CH => "CH",
            Phoneme::D => "D",
            Phoneme::DH => "DH",
            Phoneme::F => "F",
            Phoneme::G => "G",
            Phoneme::HH => "HH",
            Phoneme::JH => "JH",
            Phoneme::K => "K",
            Phoneme::L => "L",
            Phoneme::M => "M",
            Phoneme::N => "N",
            Phoneme::NG => "NG",
            Phoneme::P => "P",
            Phoneme::R => "R",
            Phoneme::S => "S",
            Phoneme::SH => "SH",
            Phoneme::T => "T",
            Phoneme::TH => "TH",
            Phoneme::V => "V",
            Phoneme::Z => "Z",
            Phoneme::ZH => "ZH",
            Phoneme::TS => "TS",
            Phoneme::NP => "NP",
            Phoneme::NB => "NB",
            Phoneme::NN => "NN",
            Phoneme::Unknown(s) => s,
        }
    }

    pub fn category(&self) -> Category {
        use Phoneme::*;
        match self {
            AA | AE | AH | AO | AW | AY | EH | ER | EY | IH | IY | OH | OW | OY | UH | UW => {
                Category::Vowel
            }
            W | Y => Category::Semivowel,
            B | CH | D | DH | F | G | HH | JH | K | L | M | N | NG | P | R | S | SH | T | TH
            | V | Z | ZH => Category::Consonant,
            TS | NP | NB | NN => Category::Special,
            Unknown(_) => Category::Unknown,
        }
    }

    pub fn is_vowel(&self) -> bool {
        self.category() == Category::Vowel
    }

    pub fn is_semivowel(&self) -> bool {
        self.category() == Category::Semivowel
    }

    pub fn is_consonant(&self) -> bool {
        self.category() == Category::Consonant
    }

    /// Pre-kana romanization. Long vowels and diphthongs span two morae
    /// separated by a space, which later becomes a token boundary.
    pub fn prekana(&self) -> &str {
        match self {
            Phoneme::AA => "a",
            Phoneme::AE => "a",
            Phoneme::AH => "a",
            Phoneme::AO => "o -",
            Phoneme::AW => "a u",
            Phoneme::AY => "a i",
            Phoneme::EH => "e",
            Phoneme::ER => "a -",
            Phoneme::EY => "e i",
            Phoneme::IH => "i",
            Phoneme::IY => "i -",
            Phoneme::OH => "o",
            Phoneme::OW => "o -",
            Phoneme::OY => "o i",
            Phoneme::UH => "u",
            Phoneme::UW => "u -",
            Phoneme::W => "w",
            Phoneme::Y => "y",
            Phoneme::B => "b",
            Phoneme::CH => "ty",
            Phoneme::D => "d",
            Phoneme::DH => "z",
            Phoneme::F => "f",
            Phoneme::G => "g",
            Phoneme::HH => "h",
            Phoneme::JH => "jy",
            Phoneme::K => "k",
            Phoneme::L => "l",
            Phoneme::M => "m",
            Phoneme::N => "n",
            Phoneme::NG => "N",
            Phoneme::P => "p",
            Phoneme::R => "r",
            Phoneme::S => "s",
            Phoneme::SH => "sy",
            Phoneme::T => "t",
            Phoneme::TH => "s",
            Phoneme::V => "b",
            Phoneme::Z => "z",
            Phoneme::ZH => "jy",
            Phoneme::TS => "ts",
            Phoneme::NP => "np",
            Phoneme::NB => "nb",
            Phoneme::NN => "nn",
            Phoneme::Unknown(s) => s,
        }
    }

    /// /æ/ and /ɒ/: rendered with a following geminate unless repair
    /// downgrades them.
    pub fn is_geminating_vowel(&self) -> bool {
        matches!(self, Phoneme::AE | Phoneme::OH)
    }

    /// Phonemes that can never follow the small tsu. Unknown symbols count as
    /// blocking.
    pub fn is_non_geminating(&self) -> bool {
        use Phoneme::*;
        match self.category() {
            Category::Vowel | Category::Semivowel | Category::Unknown => true,
            _ => matches!(
                self,
                B | D | DH | F | G | HH | JH | L | M | N | NG | R | V | Z | ZH | NP | NB
            ),
        }
    }

    /// Short monophthongs that close a syllable with a geminate before a
    /// word-final voiceless stop.
    pub fn is_lax_vowel(&self) -> bool {
        matches!(
            self,
            Phoneme::AA | Phoneme::AH | Phoneme::EH | Phoneme::IH | Phoneme::UH
        )
    }

    pub fn is_voiceless_stop(&self) -> bool {
        matches!(
            self,
            Phoneme::K | Phoneme::P | Phoneme::T | Phoneme::CH | Phoneme::TS
        )
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
