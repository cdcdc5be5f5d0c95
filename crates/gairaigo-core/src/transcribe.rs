//! The end-to-end pipeline: phonemes (and optionally a spelling) in,
//! pre-kana, phonology-only kana and final kana out.

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::cluster::{cluster, Cluster};
use crate::normalize::{canonical, ipa_to_arpabet, parse_phonemes, split_variants};
use crate::overlay;
use crate::phoneme::Phoneme;
use crate::render::{self, KanaTable, Rendering};
use crate::repair::{repair, RepairOptions};
use crate::settings::Settings;

/// The three artifacts produced for one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcription {
    /// Canonical phoneme string the kana was derived from.
    pub phonemes: String,
    pub prekana: String,
    /// Kana from phonology alone, long-vowel runs collapsed.
    pub phonology: String,
    /// Kana after spelling-based corrections.
    pub final_kana: String,
}

/// Every intermediate stage for one word, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub phonemes: Vec<String>,
    /// Clusters straight out of the clusterer.
    pub clusters: Vec<String>,
    /// Clusters after repair, as rendered.
    pub repaired: Vec<String>,
    /// Pre-kana of each repaired cluster.
    pub cluster_prekana: Vec<String>,
    /// Kana of each repaired cluster.
    pub cluster_kana: Vec<String>,
    pub prekana: String,
    /// Kana before any long-vowel collapse.
    pub kana: String,
    pub phonology: String,
    pub final_kana: String,
    /// Pre-kana tokens the kana table has no entry for.
    pub unmapped: Vec<String>,
    /// Input symbols outside the phoneme alphabet, copied through verbatim.
    pub unknown: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct Transcriber<'t> {
    repair: RepairOptions,
    overlay: bool,
    table: &'t KanaTable,
}

impl<'t> Transcriber<'t> {
    /// Default repair options with the overlay enabled.
    pub fn new(table: &'t KanaTable) -> Self {
        Self {
            repair: RepairOptions::default(),
            overlay: true,
            table,
        }
    }

    pub fn with_repair(mut self, repair: RepairOptions) -> Self {
        self.repair = repair;
        self
    }

    pub fn with_overlay(mut self, enabled: bool) -> Self {
        self.overlay = enabled;
        self
    }

    pub fn table(&self) -> &'t KanaTable {
        self.table
    }

    /// Cluster and repair a parsed phoneme sequence.
    pub fn clusters(&self, phonemes: &[Phoneme]) -> Vec<Cluster> {
        repair(cluster(phonemes), &self.repair)
    }

    pub fn prekana(&self, phonemes: &str) -> String {
        render::prekana(&self.clusters(&parse_phonemes(phonemes)))
    }

    pub fn render(&self, phonemes: &str) -> Rendering {
        render::render(&self.clusters(&parse_phonemes(phonemes)), self.table)
    }

    /// Apply the spelling overlay (when enabled) and collapse long vowels.
    pub fn finalize(&self, kana: &str, spelling: &str) -> String {
        if self.overlay {
            overlay::correct(kana, spelling)
        } else {
            overlay::collapse_long_vowels(kana)
        }
    }

    pub fn transcribe(&self, phonemes: &str, spelling: &str) -> Transcription {
        let _span = debug_span!("transcribe", phonemes, spelling).entered();

        let Rendering { prekana, kana } = self.render(phonemes);
        let phonology = overlay::collapse_long_vowels(&kana);
        let final_kana = self.finalize(&kana, spelling);

        debug!(%prekana, %final_kana);
        Transcription {
            phonemes: canonical(phonemes),
            prekana,
            phonology,
            final_kana,
        }
    }

    /// Convert IPA and transcribe every pronunciation variant it contains.
    pub fn transcribe_ipa(&self, ipa: &str, spelling: &str) -> Vec<Transcription> {
        let arpabet = ipa_to_arpabet(ipa);
        split_variants(&arpabet)
            .iter()
            .map(|variant| self.transcribe(variant, spelling))
            .collect()
    }

    pub fn explain(&self, phonemes: &str, spelling: &str) -> Explanation {
        let parsed = parse_phonemes(phonemes);
        let raw = cluster(&parsed);
        let repaired = repair(raw.clone(), &self.repair);
        let Rendering { prekana, kana } = render::render(&repaired, self.table);

        let mut unmapped: Vec<String> = Vec::new();
        for c in repaired.iter().filter(|c| c.unknown_symbol().is_none()) {
            for token in self.table.unmapped_tokens(&c.prekana()) {
                if !unmapped.contains(&token) {
                    unmapped.push(token);
                }
            }
        }

        Explanation {
            phonemes: parsed.iter().map(|p| p.symbol().to_string()).collect(),
            clusters: raw.iter().map(Cluster::to_string).collect(),
            repaired: repaired.iter().map(Cluster::to_string).collect(),
            cluster_prekana: repaired.iter().map(Cluster::prekana).collect(),
            cluster_kana: repaired
                .iter()
                .map(|c| render::render_cluster(c, self.table))
                .collect(),
            unmapped,
            unknown: repaired
                .iter()
                .filter_map(Cluster::unknown_symbol)
                .map(str::to_string)
                .collect(),
            phonology: overlay::collapse_long_vowels(&kana),
            final_kana: self.finalize(&kana, spelling),
            prekana,
            kana,
        }
    }
}

impl Transcriber<'static> {
    /// Build from settings, rendering through the global kana table.
    pub fn from_settings(settings: &Settings) -> Self {
        Transcriber::new(KanaTable::global())
            .with_repair(settings.repair)
            .with_overlay(settings.overlay.enabled)
    }
}
