use std::collections::BTreeMap;

use serde::Deserialize;

use crate::unicode::hiragana_to_katakana;

#[derive(Deserialize)]
struct KanaConfig {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum KanaTableError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("non-ASCII key: {0}")]
    NonAsciiKey(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("kana table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a sorted `BTreeMap<pre-kana, katakana>`.
///
/// Hiragana values are converted to katakana.
pub fn parse_kana_toml(toml_str: &str) -> Result<BTreeMap<String, String>, KanaTableError> {
    let config: KanaConfig =
        toml::from_str(toml_str).map_err(|e| KanaTableError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(KanaTableError::Empty);
    }

    let mut mappings = BTreeMap::new();
    for (key, value) in config.mappings {
        if !key.is_ascii() {
            return Err(KanaTableError::NonAsciiKey(key));
        }
        if value.is_empty() {
            return Err(KanaTableError::EmptyValue(key));
        }
        mappings.insert(key, hiragana_to_katakana(&value));
    }

    Ok(mappings)
}
