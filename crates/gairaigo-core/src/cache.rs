//! Caller-owned memoisation of pipeline results.
//!
//! Every stage is a pure function of its input string, so results can be
//! reused across calls. Nothing here is global: a batch driver creates a
//! [`TranscriptionCache`], picks its eviction policy, and drops it when done.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use tracing::debug;

use crate::normalize;
use crate::overlay;
use crate::render::Rendering;
use crate::transcribe::{Transcriber, Transcription};

/// Eviction policy for a [`MemoCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Keep every entry for the lifetime of the cache.
    #[default]
    Unbounded,
    /// Keep at most this many entries, evicting the oldest insertion first.
    /// A capacity of zero disables storage.
    Fifo(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
}

/// String-keyed memo table.
#[derive(Debug)]
pub struct MemoCache<V> {
    policy: CachePolicy,
    map: HashMap<String, V>,
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
}

impl<V: Clone> MemoCache<V> {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            policy,
            map: HashMap::new(),
            order: VecDeque::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.map.get(key)
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, key: &str, compute: impl FnOnce() -> V) -> V {
        if let Some(v) = self.map.get(key) {
            self.hits += 1;
            return v.clone();
        }
        self.misses += 1;
        let value = compute();
        self.insert(key.to_string(), value.clone());
        value
    }

    fn insert(&mut self, key: String, value: V) {
        if let CachePolicy::Fifo(capacity) = self.policy {
            if capacity == 0 {
                return;
            }
            while self.map.len() >= capacity {
                let Some(oldest) = self.order.pop_front() else {
                    break;
                };
                self.map.remove(&oldest);
                debug!(key = %oldest, "cache eviction");
            }
            self.order.push_back(key.clone());
        }
        self.map.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            len: self.map.len(),
        }
    }
}

/// Separator between phonemes and spelling in final-kana keys. Never
/// appears in either.
const KEY_SEPARATOR: char = '\x1f';

/// Memoised front end to a [`Transcriber`].
///
/// Renderings are keyed by the raw phoneme string, final kana by phonemes
/// plus spelling, and IPA conversions by the raw IPA string.
pub struct TranscriptionCache<'t> {
    transcriber: Transcriber<'t>,
    renderings: MemoCache<Rendering>,
    finals: MemoCache<String>,
    ipa: MemoCache<String>,
}

impl<'t> TranscriptionCache<'t> {
    pub fn new(transcriber: Transcriber<'t>, policy: CachePolicy) -> Self {
        Self {
            transcriber,
            renderings: MemoCache::new(policy),
            finals: MemoCache::new(policy),
            ipa: MemoCache::new(policy),
        }
    }

    pub fn render(&mut self, phonemes: &str) -> Rendering {
        let transcriber = &self.transcriber;
        self.renderings
            .get_or_insert_with(phonemes, || transcriber.render(phonemes))
    }

    pub fn transcribe(&mut self, phonemes: &str, spelling: &str) -> Transcription {
        let rendering = self.render(phonemes);
        let key = format!("{phonemes}{KEY_SEPARATOR}{spelling}");
        let transcriber = &self.transcriber;
        let final_kana = self
            .finals
            .get_or_insert_with(&key, || transcriber.finalize(&rendering.kana, spelling));
        Transcription {
            phonemes: normalize::canonical(phonemes),
            phonology: overlay::collapse_long_vowels(&rendering.kana),
            prekana: rendering.prekana,
            final_kana,
        }
    }

    pub fn ipa_to_arpabet(&mut self, ipa: &str) -> String {
        self.ipa
            .get_or_insert_with(ipa, || normalize::ipa_to_arpabet(ipa))
    }

    /// One transcription per pronunciation variant of `ipa`.
    pub fn transcribe_ipa(&mut self, ipa: &str, spelling: &str) -> Vec<Transcription> {
        let arpabet = self.ipa_to_arpabet(ipa);
        normalize::split_variants(&arpabet)
            .iter()
            .map(|variant| self.transcribe(variant, spelling))
            .collect()
    }

    /// Stats for the rendering, final-kana and IPA tables, in that order.
    pub fn stats(&self) -> [CacheStats; 3] {
        [
            self.renderings.stats(),
            self.finals.stats(),
            self.ipa.stats(),
        ]
    }

    /// Drop every entry. Hit and miss counters are kept.
    pub fn clear(&mut self) {
        self.renderings.clear();
        self.finals.clear();
        self.ipa.clear();
    }
}
