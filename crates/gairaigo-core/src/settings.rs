//! Global settings loaded from TOML, following the same OnceLock pattern as the kana table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

use crate::cache::CachePolicy;
use crate::repair::RepairOptions;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub repair: RepairOptions,
    pub overlay: OverlaySettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverlaySettings {
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePolicyKind {
    Unbounded,
    Fifo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub policy: CachePolicyKind,
    /// Entry limit per table; ignored when `policy = "unbounded"`.
    #[serde(default)]
    pub capacity: usize,
}

impl CacheSettings {
    pub fn policy(&self) -> CachePolicy {
        match self.policy {
            CachePolicyKind::Unbounded => CachePolicy::Unbounded,
            CachePolicyKind::Fifo => CachePolicy::Fifo(self.capacity),
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.cache.policy == CachePolicyKind::Fifo && s.cache.capacity == 0 {
        return Err(SettingsError::InvalidValue {
            field: "cache.capacity".to_string(),
            reason: "must be positive for the fifo policy".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert!(!s.repair.rhoticity);
        assert!(s.repair.closed_syllable_gemination);
        assert!(s.overlay.enabled);
        assert_eq!(s.cache.policy(), CachePolicy::Unbounded);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[repair]
rhoticity = true
closed_syllable_gemination = false

[overlay]
enabled = false

[cache]
policy = "fifo"
capacity = 4096
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert!(s.repair.rhoticity);
        assert!(!s.repair.closed_syllable_gemination);
        assert!(!s.overlay.enabled);
        assert_eq!(s.cache.policy(), CachePolicy::Fifo(4096));
    }

    #[test]
    fn repair_keys_default_when_omitted() {
        let toml = r#"
[repair]

[overlay]
enabled = true

[cache]
policy = "unbounded"
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.repair, RepairOptions::default());
    }

    #[test]
    fn error_fifo_without_capacity() {
        let toml = r#"
[repair]

[overlay]
enabled = true

[cache]
policy = "fifo"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("cache.capacity"));
    }

    #[test]
    fn error_unknown_policy() {
        let toml = r#"
[repair]

[overlay]
enabled = true

[cache]
policy = "lru"
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[repair]
rhoticity = false
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
