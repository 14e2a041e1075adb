//! Audio produced on each trigger

use super::synthesizer::ToneSynthesizer;

/// What a trigger cycle enqueues: a freshly synthesized tone, or a
/// pre-loaded recording already converted to the stream format.
#[derive(Debug, Clone)]
pub enum ToneSource {
    Synthesized(ToneSynthesizer),
    Recorded(Vec<f32>),
}

impl ToneSource {
    /// Interleaved sample count of one cycle
    pub fn buffer_len(&self) -> usize {
        match self {
            Self::Synthesized(synth) => synth.buffer_len(),
            Self::Recorded(samples) => samples.len(),
        }
    }

    /// Produce the next cycle. Synthesized tones are rendered into
    /// `scratch`; recordings are returned as-is.
    pub fn next_cycle<'a>(&'a mut self, scratch: &'a mut Vec<f32>) -> &'a [f32] {
        match self {
            Self::Synthesized(synth) => {
                scratch.resize(synth.buffer_len(), 0.0);
                synth.synthesize(scratch);
                scratch
            }
            Self::Recorded(samples) => samples,
        }
    }
}
