//! Audio-cue dispatch at the presentation boundary. The simulation queues
//! discrete cues; a sink consumes them fire-and-forget and never reaches
//! back into game state.

use manor_core::types::AudioCue;
use tracing::debug;

pub trait AudioSink {
    fn cue(&mut self, cue: AudioCue);
}

/// Sink for builds without an audio backend: cues land in the log so the
/// trigger timing is still observable.
#[derive(Default)]
pub struct TracingAudioSink;

impl AudioSink for TracingAudioSink {
    fn cue(&mut self, cue: AudioCue) {
        debug!(?cue, "audio cue");
    }
}
