//! Grouping of phonemes into renderable syllable-like clusters.
//!
//! Two forward passes, each building a new vector:
//!
//! 1. Segmentation: cut after every vowel, then split each segment into an
//!    onset+nucleus cluster (`CSV`, `CV`, `SV` or `V`, longest first) and
//!    the consonants in front of it, which close the previous syllable.
//! 2. Digraph merging: fuse `t s`, `m p` and `m b`, split `d w`, and break
//!    any remaining consonant-only group into one cluster per phoneme.

use std::fmt;

use crate::phoneme::Phoneme;

/// One renderable unit.
///
/// A multi-phoneme cluster always ends in a vowel. Consonant-only material
/// is carried one phoneme (or fused unit) per cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cluster {
    phonemes: Vec<Phoneme>,
    geminate: bool,
}

impl Cluster {
    /// Build a cluster. A trailing /æ/ or /ɒ/ starts out geminate.
    pub fn new(phonemes: Vec<Phoneme>) -> Self {
        let geminate = phonemes.last().is_some_and(Phoneme::is_geminating_vowel);
        Self { phonemes, geminate }
    }

    pub fn single(phoneme: Phoneme) -> Self {
        Self::new(vec![phoneme])
    }

    pub fn phonemes(&self) -> &[Phoneme] {
        &self.phonemes
    }

    pub fn first(&self) -> Option<&Phoneme> {
        self.phonemes.first()
    }

    pub fn last(&self) -> Option<&Phoneme> {
        self.phonemes.last()
    }

    /// Whether the cluster is followed by a small tsu when rendered.
    pub fn is_geminate(&self) -> bool {
        self.geminate
    }

    pub(crate) fn set_geminate(&mut self, geminate: bool) {
        self.geminate = geminate;
    }

    pub fn is_consonant_only(&self) -> bool {
        !self.phonemes.iter().any(Phoneme::is_vowel)
    }

    /// Whether this is exactly `[phoneme]`.
    pub fn is(&self, phoneme: &Phoneme) -> bool {
        self.phonemes.len() == 1 && &self.phonemes[0] == phoneme
    }

    /// The raw symbol when this cluster is a lone out-of-alphabet token.
    /// Such tokens never share a cluster with anything else.
    pub fn unknown_symbol(&self) -> Option<&str> {
        match self.phonemes.as_slice() {
            [Phoneme::Unknown(raw)] => Some(raw),
            _ => None,
        }
    }

    /// Concatenated pre-kana of every phoneme, plus ` x` when geminate.
    pub fn prekana(&self) -> String {
        let mut out: String = self.phonemes.iter().map(Phoneme::prekana).collect();
        if self.geminate {
            out.push_str(" x");
        }
        out
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, p) in self.phonemes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{p}")?;
        }
        if self.geminate {
            f.write_str(" ッ")?;
        }
        Ok(())
    }
}

/// Group a stress-free phoneme sequence into clusters.
pub fn cluster(phonemes: &[Phoneme]) -> Vec<Cluster> {
    merge_digraphs(segment(phonemes))
}

/// Expand fused units back into the phonemes they replaced
/// (`TS → T S`, `NP → M P`, `NB → M B`, `NN → M`).
pub fn unfuse(clusters: &[Cluster]) -> Vec<Phoneme> {
    let mut out = Vec::new();
    for p in clusters.iter().flat_map(|c| c.phonemes()) {
        match p {
            Phoneme::TS => out.extend([Phoneme::T, Phoneme::S]),
            Phoneme::NP => out.extend([Phoneme::M, Phoneme::P]),
            Phoneme::NB => out.extend([Phoneme::M, Phoneme::B]),
            Phoneme::NN => out.push(Phoneme::M),
            other => out.push(other.clone()),
        }
    }
    out
}

fn segment(phonemes: &[Phoneme]) -> Vec<Vec<Phoneme>> {
    let mut groups = Vec::new();
    let mut start = 0;
    for (i, p) in phonemes.iter().enumerate() {
        if p.is_vowel() {
            push_segment(&phonemes[start..=i], &mut groups);
            start = i + 1;
        }
    }
    if start < phonemes.len() {
        push_segment(&phonemes[start..], &mut groups);
    }
    groups
}

/// Index where the onset+nucleus part of a segment begins.
fn onset_start(seg: &[Phoneme]) -> usize {
    let n = seg.len();
    match seg {
        [.., c, s, v] if c.is_consonant() && s.is_semivowel() && v.is_vowel() => n - 3,
        [.., c, v] if (c.is_consonant() || c.is_semivowel()) && v.is_vowel() => n - 2,
        [.., v] if v.is_vowel() => n - 1,
        _ => n,
    }
}

fn push_segment(seg: &[Phoneme], groups: &mut Vec<Vec<Phoneme>>) {
    let at = onset_start(seg);
    if at > 0 {
        groups.push(seg[..at].to_vec());
    }
    if at < seg.len() {
        groups.push(seg[at..].to_vec());
    }
}

enum Merge {
    Fuse(Phoneme),
    /// `t` whose following group starts with `s`: dropped here, fused there.
    FuseIntoNext,
    SplitDw,
    Atomize,
    Keep,
}

fn classify(group: &[Phoneme], next_first: Option<&Phoneme>) -> Merge {
    match group {
        [Phoneme::T, Phoneme::S] => Merge::Fuse(Phoneme::TS),
        [Phoneme::T] if next_first == Some(&Phoneme::S) => Merge::FuseIntoNext,
        [Phoneme::M, Phoneme::P] => Merge::Fuse(Phoneme::NP),
        [Phoneme::M] if next_first == Some(&Phoneme::P) => Merge::Fuse(Phoneme::NN),
        [Phoneme::M, Phoneme::B] => Merge::Fuse(Phoneme::NB),
        [Phoneme::M] if next_first == Some(&Phoneme::B) => Merge::Fuse(Phoneme::NN),
        [Phoneme::D, Phoneme::W, .., last] if last.is_vowel() => Merge::SplitDw,
        [.., last] if !last.is_vowel() => Merge::Atomize,
        _ => Merge::Keep,
    }
}

fn merge_digraphs(groups: Vec<Vec<Phoneme>>) -> Vec<Cluster> {
    let mut out = Vec::with_capacity(groups.len());
    let mut pending_ts = false;

    for (i, mut group) in groups.iter().cloned().enumerate() {
        if std::mem::take(&mut pending_ts) {
            if let Some(first) = group.first_mut() {
                *first = Phoneme::TS;
            }
        }
        let next_first = groups.get(i + 1).and_then(|g| g.first());

        match classify(&group, next_first) {
            Merge::Fuse(unit) => out.push(Cluster::single(unit)),
            Merge::FuseIntoNext => pending_ts = true,
            Merge::SplitDw => {
                out.push(Cluster::single(Phoneme::D));
                out.push(Cluster::new(group.split_off(1)));
            }
            Merge::Atomize => out.extend(group.into_iter().map(Cluster::single)),
            Merge::Keep => out.push(Cluster::new(group)),
        }
    }
    out
}
