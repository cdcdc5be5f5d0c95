//! English phoneme to katakana transduction.
//!
//! The pipeline runs strictly forward:
//! [`normalize`] → [`cluster`] → [`repair`] → [`render`] → [`overlay`].
//! [`transcribe::Transcriber`] ties the stages together and
//! [`cache::TranscriptionCache`] memoises it for batch use.

pub mod cache;
pub mod cluster;
pub mod normalize;
pub mod overlay;
pub mod phoneme;
pub mod render;
pub mod repair;
pub mod settings;
pub mod transcribe;
pub mod unicode;

#[cfg(test)]
mod tests;

pub use cache::{CachePolicy, TranscriptionCache};
pub use phoneme::Phoneme;
pub use render::KanaTable;
pub use transcribe::{Explanation, Transcriber, Transcription};
