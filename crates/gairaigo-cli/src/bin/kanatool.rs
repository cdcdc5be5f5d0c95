use std::fs;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gairaigo_cli::commands::{config_ops, convert_ops};
use gairaigo_cli::die;
use gairaigo_core::settings;
use gairaigo_core::{KanaTable, Transcriber};

#[derive(Parser)]
#[command(name = "kanatool", about = "English phoneme to katakana diagnostics")]
struct Cli {
    /// Custom kana table TOML (replaces the embedded table)
    #[arg(long, global = true)]
    kana_table: Option<String>,
    /// Custom settings TOML (replaces the embedded settings)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transcribe an ARPAbet phoneme string
    Convert {
        /// Phonemes, e.g. "B IH0 HH IY1 M AH0 TH S"
        phonemes: String,
        /// Orthographic spelling used by the exception overlay
        #[arg(long, default_value = "")]
        spelling: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every pipeline stage for a phoneme string
    Explain {
        /// Phonemes
        phonemes: String,
        /// Orthographic spelling (optional)
        #[arg(long, default_value = "")]
        spelling: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize IPA and transcribe each pronunciation variant
    Ipa {
        /// IPA transcription, variants separated by ';'
        ipa: String,
        /// Orthographic spelling (optional)
        #[arg(long, default_value = "")]
        spelling: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Exit non-zero if the output contains unmapped symbols
    Check {
        /// Phonemes
        phonemes: String,
        /// Orthographic spelling (optional)
        #[arg(long, default_value = "")]
        spelling: String,
    },
    /// Export the default kana table as TOML
    KanaExport,
    /// Validate a custom kana table TOML file
    KanaValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn init_logging(verbose: bool) {
    let directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_overrides(kana_table: Option<&str>, settings_file: Option<&str>) {
    if let Some(path) = kana_table {
        let content = die!(fs::read_to_string(path), "Failed to read kana table {path}: {}");
        die!(KanaTable::init_custom(content), "Invalid kana table {path}: {}");
        debug!(path, "custom kana table installed");
    }
    if let Some(path) = settings_file {
        let content = die!(fs::read_to_string(path), "Failed to read settings {path}: {}");
        die!(settings::init_custom(content), "Invalid settings {path}: {}");
        debug!(path, "custom settings installed");
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    load_overrides(cli.kana_table.as_deref(), cli.settings.as_deref());

    let transcriber = Transcriber::from_settings(settings::settings());

    match cli.command {
        Command::Convert {
            phonemes,
            spelling,
            json,
        } => convert_ops::convert_cmd(&transcriber, &phonemes, &spelling, json),
        Command::Explain {
            phonemes,
            spelling,
            json,
        } => convert_ops::explain_cmd(&transcriber, &phonemes, &spelling, json),
        Command::Ipa {
            ipa,
            spelling,
            json,
        } => convert_ops::ipa_cmd(&transcriber, &ipa, &spelling, json),
        Command::Check { phonemes, spelling } => {
            convert_ops::check_cmd(&transcriber, &phonemes, &spelling)
        }
        Command::KanaExport => config_ops::kana_export(),
        Command::KanaValidate { file } => config_ops::kana_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
