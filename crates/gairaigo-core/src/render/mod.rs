//! Cluster-to-kana rendering.
//!
//! Rendering is two table lookups: each cluster's phonemes become one
//! pre-kana token (see [`Cluster::prekana`]), and each space-separated
//! pre-kana token becomes katakana through a [`KanaTable`] loaded from TOML.
//! Out-of-alphabet symbols never reach the table; they are copied into the
//! kana as fault markers.

mod config;
mod table;

use serde::Serialize;

use crate::cluster::Cluster;
use crate::unicode::is_clean_katakana;

pub use config::{parse_kana_toml, KanaTableError};
pub use table::{KanaTable, DEFAULT_TOML};

/// Phonology-only output for one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendering {
    /// Space-joined per-cluster pre-kana.
    pub prekana: String,
    /// Concatenated kana, before any spelling-based correction.
    pub kana: String,
}

/// Join the pre-kana of every cluster with single spaces.
pub fn prekana(clusters: &[Cluster]) -> String {
    clusters
        .iter()
        .map(Cluster::prekana)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render(clusters: &[Cluster], table: &KanaTable) -> Rendering {
    let prekana = prekana(clusters);
    let kana = clusters.iter().map(|c| render_cluster(c, table)).collect();
    Rendering { prekana, kana }
}

/// Kana for one cluster.
pub fn render_cluster(cluster: &Cluster, table: &KanaTable) -> String {
    match cluster.unknown_symbol() {
        Some(raw) => fault_marker(raw),
        None => table.convert(&cluster.prekana()),
    }
}

/// Kana for an unknown symbol: the symbol itself, bracketed when it would
/// otherwise read as clean katakana (including the empty string).
pub fn fault_marker(raw: &str) -> String {
    if is_clean_katakana(raw) {
        format!("<{raw}>")
    } else {
        raw.to_string()
    }
}
