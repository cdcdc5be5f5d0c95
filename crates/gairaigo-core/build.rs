fn main() {
    // Validate embedded TOML files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
        &["repair", "overlay", "cache"],
    );
    validate_toml(
        "src/render/default_kana.toml",
        include_str!("src/render/default_kana.toml"),
        &["mappings"],
    );
}

fn validate_toml(path: &str, content: &str, sections: &[&str]) {
    let Ok(value) = content.parse::<toml::Table>() else {
        panic!("{path} contains invalid TOML");
    };
    for section in sections {
        if !value.get(*section).is_some_and(toml::Value::is_table) {
            panic!("{path} is missing the [{section}] table");
        }
    }
}
