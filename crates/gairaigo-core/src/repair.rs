//! Context-sensitive fixes applied to clustered words before rendering:
//! gemination placement, final consonant cleanup, and the optional
//! rhoticity rewrite.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::cluster::Cluster;
use crate::phoneme::Phoneme;

/// Switches for the optional repair passes. Loaded from `[repair]` in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairOptions {
    /// Rewrite vowel+R codas before rendering. Off in production.
    pub rhoticity: bool,
    /// Add a small tsu after a lax vowel closed by a voiceless stop.
    pub closed_syllable_gemination: bool,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self {
            rhoticity: false,
            closed_syllable_gemination: true,
        }
    }
}

/// Apply every enabled repair pass to a freshly clustered word.
///
/// Passes run in a fixed order and none of them looks past the last cluster.
pub fn repair(clusters: Vec<Cluster>, options: &RepairOptions) -> Vec<Cluster> {
    let clusters = if options.rhoticity {
        repair_rhoticity(&clusters)
    } else {
        clusters
    };
    let clusters = reduce_initial_ow(clusters);
    let clusters = guard_gemination(&clusters);
    let clusters = merge_final_affricate(clusters);
    if options.closed_syllable_gemination {
        geminate_closed_syllable(&clusters)
    } else {
        clusters
    }
}

fn is_lone_vowel(cluster: &Cluster) -> bool {
    matches!(cluster.phonemes(), [v] if v.is_vowel())
}

fn repair_rhoticity(clusters: &[Cluster]) -> Vec<Cluster> {
    let mut out = Vec::with_capacity(clusters.len() + 1);
    let mut carry_r = false;

    for (i, cluster) in clusters.iter().enumerate() {
        let next = clusters.get(i + 1);
        let mut phonemes = cluster.phonemes().to_vec();
        if std::mem::take(&mut carry_r) {
            phonemes.insert(0, Phoneme::R);
        }

        if next.is_none() && matches!(phonemes.as_slice(), [Phoneme::R]) {
            trace!("rhoticity: final R");
            out.push(Cluster::single(Phoneme::AH));
            continue;
        }
        if phonemes.last() == Some(&Phoneme::ER) && next.is_some_and(is_lone_vowel) {
            trace!("rhoticity: ER before vowel");
            phonemes.pop();
            phonemes.push(Phoneme::AH);
            carry_r = true;
        }
        if let [Phoneme::R, Phoneme::W, ..] = phonemes.as_slice() {
            trace!("rhoticity: R W onset");
            out.push(Cluster::single(Phoneme::AH));
            out.push(Cluster::new(phonemes.split_off(1)));
            continue;
        }
        out.push(Cluster::new(phonemes));
    }
    out
}

/// A word-initial lone /oʊ/ before an l-syllable is unstressed and renders as
/// a short o (OLYMPICS → オリンピックス, while OVER keeps オーバー).
fn reduce_initial_ow(mut clusters: Vec<Cluster>) -> Vec<Cluster> {
    let reduces = matches!(
        clusters.as_slice(),
        [first, next, ..] if first.is(&Phoneme::OW)
            && next.first() == Some(&Phoneme::L)
            && !next.is_consonant_only()
    );
    if reduces {
        trace!("initial OW reduced");
        clusters[0] = Cluster::single(Phoneme::OH);
    }
    clusters
}

/// The small tsu cannot close a word or precede a non-geminating phoneme.
fn guard_gemination(clusters: &[Cluster]) -> Vec<Cluster> {
    clusters
        .iter()
        .enumerate()
        .map(|(i, cluster)| {
            let mut cluster = cluster.clone();
            if cluster.is_geminate() {
                let blocked = clusters
                    .get(i + 1)
                    .and_then(Cluster::first)
                    .map_or(true, Phoneme::is_non_geminating);
                if blocked {
                    cluster.set_geminate(false);
                }
            }
            cluster
        })
        .collect()
}

fn merge_final_affricate(mut clusters: Vec<Cluster>) -> Vec<Cluster> {
    let n = clusters.len();
    if n < 2 {
        return clusters;
    }
    let (a, b) = (&clusters[n - 2], &clusters[n - 1]);
    let merged = if a.is(&Phoneme::D) && b.is(&Phoneme::Z) {
        Phoneme::Z
    } else if a.is(&Phoneme::T) && b.is(&Phoneme::S) {
        Phoneme::TS
    } else if a.is(&Phoneme::D) && b.is(&Phoneme::T) {
        Phoneme::T
    } else {
        return clusters;
    };
    trace!(%merged, "final cleanup");
    clusters.truncate(n - 2);
    clusters.push(Cluster::single(merged));
    clusters
}

fn geminate_closed_syllable(clusters: &[Cluster]) -> Vec<Cluster> {
    clusters
        .iter()
        .enumerate()
        .map(|(i, cluster)| {
            let mut cluster = cluster.clone();
            let rest = &clusters[i + 1..];
            let closes = !cluster.is_geminate()
                && cluster.last().is_some_and(Phoneme::is_lax_vowel)
                && rest
                    .first()
                    .and_then(Cluster::first)
                    .is_some_and(Phoneme::is_voiceless_stop)
                && rest.iter().all(Cluster::is_consonant_only);
            if closes {
                trace!(%cluster, "closed syllable gemination");
                cluster.set_geminate(true);
            }
            cluster
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::cluster;
    use crate::normalize::parse_phonemes;

    fn prekana_with(arpabet: &str, options: &RepairOptions) -> String {
        repair(cluster(&parse_phonemes(arpabet)), options)
            .iter()
            .map(Cluster::prekana)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn prekana(arpabet: &str) -> String {
        prekana_with(arpabet, &RepairOptions::default())
    }

    #[test]
    fn test_gemination_cleared_at_word_end() {
        assert_eq!(prekana("K AE"), "ka");
        assert_eq!(prekana("HH OH"), "ho");
    }

    #[test]
    fn test_gemination_cleared_before_non_geminating() {
        assert_eq!(prekana("K AE N"), "ka n");
        assert_eq!(prekana("B AE D"), "ba d");
    }

    #[test]
    fn test_gemination_kept_before_voiceless_stop() {
        assert_eq!(prekana("K AE T"), "ka x t");
        assert_eq!(prekana("HH OH T"), "ho x t");
    }

    #[test]
    fn test_final_dz_and_dt() {
        assert_eq!(prekana("K IH D Z"), "ki z");
        assert_eq!(prekana("T IY D T"), "ti - t");
    }

    #[test]
    fn test_closed_syllable_gemination() {
        assert_eq!(prekana("P IH K"), "pi x k");
        assert_eq!(prekana("M AH CH"), "ma x ty");
        assert_eq!(prekana("OW L IH M P IH K S"), "o li nn pi x k s");
    }

    #[test]
    fn test_closed_syllable_needs_consonant_only_tail() {
        assert_eq!(prekana("P IH K CH ER"), "pi k tya -");
        assert_eq!(prekana("P IH K N IH K"), "pi k ni x k");
        assert_eq!(prekana("B AH S"), "ba s");
    }

    #[test]
    fn test_closed_syllable_disabled() {
        let options = RepairOptions {
            closed_syllable_gemination: false,
            ..RepairOptions::default()
        };
        assert_eq!(prekana_with("P IH K", &options), "pi k");
    }

    #[test]
    fn test_ow_stays_long() {
        assert_eq!(prekana("HH OW M"), "ho - m");
        assert_eq!(prekana("G OW"), "go -");
        assert_eq!(prekana("OW V ER"), "o - ba -");
        assert_eq!(prekana("OW L"), "o - l");
    }

    #[test]
    fn test_initial_ow_reduced_before_l_syllable() {
        assert_eq!(prekana("OW L IY AE N D ER"), "o li - a n da -");
        assert_eq!(prekana("B OW L IY"), "bo - li -");
    }

    #[test]
    fn test_unknown_blocks_gemination() {
        assert_eq!(prekana("K AE x"), "ka x");
        assert_eq!(prekana("K AE QX T"), "ka QX t");
    }

    #[test]
    fn test_rhoticity_off_by_default() {
        assert_eq!(prekana("K AA R"), "ka r");
        assert_eq!(prekana("F ER IY"), "fa - i -");
    }

    #[test]
    fn test_rhoticity_when_enabled() {
        let options = RepairOptions {
            rhoticity: true,
            ..RepairOptions::default()
        };
        assert_eq!(prekana_with("K AA R", &options), "ka a");
        assert_eq!(prekana_with("F ER IY", &options), "fa ri -");
        assert_eq!(prekana_with("K AA R W AA", &options), "ka a wa");
    }

    #[test]
    fn test_empty() {
        assert!(repair(Vec::new(), &RepairOptions::default()).is_empty());
    }
}
