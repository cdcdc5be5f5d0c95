use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use super::config::{parse_kana_toml, KanaTableError};

pub const DEFAULT_TOML: &str = include_str!("default_kana.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Pre-kana token to katakana lookup.
#[derive(Debug, Clone)]
pub struct KanaTable {
    map: HashMap<String, String>,
}

impl KanaTable {
    /// Build a standalone table, outside the global singleton.
    pub fn from_toml(toml_str: &str) -> Result<Self, KanaTableError> {
        let map = parse_kana_toml(toml_str)?;
        Ok(Self {
            map: map.into_iter().collect(),
        })
    }

    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), KanaTableError> {
        // Validate eagerly
        parse_kana_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| KanaTableError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static KanaTable {
        static INSTANCE: OnceLock<KanaTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            KanaTable::from_toml(toml_str).expect("kana TOML must be valid")
        })
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.map.get(token).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Map every space-separated pre-kana token to kana and concatenate.
    /// Unmapped tokens are copied through as-is.
    pub fn convert(&self, prekana: &str) -> String {
        let mut out = String::with_capacity(prekana.len() * 2);
        for token in prekana.split(' ').filter(|t| !t.is_empty()) {
            match self.get(token) {
                Some(kana) => out.push_str(kana),
                None => {
                    debug!(token, "unmapped pre-kana token");
                    out.push_str(token);
                }
            }
        }
        out
    }

    /// Distinct tokens of `prekana` that have no entry, in first-seen order.
    pub fn unmapped_tokens(&self, prekana: &str) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for token in prekana.split(' ').filter(|t| !t.is_empty()) {
            if self.get(token).is_none() && !missing.iter().any(|m| m == token) {
                missing.push(token.to_string());
            }
        }
        missing
    }
}
