use std::fs;

use gairaigo_core::render::{self, parse_kana_toml};
use gairaigo_core::settings::{self, parse_settings_toml};

pub fn kana_export() {
    print!("{}", render::DEFAULT_TOML);
}

pub fn kana_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(parse_kana_toml(&content), "Error: {}");
    println!("OK: {} mappings", map.len());
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: repair.rhoticity={}, repair.closed_syllable_gemination={}, overlay.enabled={}, cache={:?}",
        s.repair.rhoticity,
        s.repair.closed_syllable_gemination,
        s.overlay.enabled,
        s.cache.policy()
    );
}
