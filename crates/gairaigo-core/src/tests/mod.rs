mod golden;

use crate::render::KanaTable;
use crate::transcribe::Transcriber;

pub(super) fn default_transcriber() -> Transcriber<'static> {
    Transcriber::new(KanaTable::global())
}
