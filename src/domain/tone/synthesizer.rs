//! Sine tone synthesis with continuous phase

use std::f64::consts::TAU;

use super::envelope::ToneEnvelopeSpec;

/// Generates one fixed-length sine tone per call.
///
/// The running sample counter carries phase across calls and is wrapped
/// modulo the sample rate after each call. With an integer frequency the
/// wrap shifts phase by whole periods only, so successive tones join
/// without a discontinuity.
#[derive(Debug, Clone)]
pub struct ToneSynthesizer {
    envelope: ToneEnvelopeSpec,
    channels: usize,
    phase_counter: u64,
}

impl ToneSynthesizer {
    pub fn new(envelope: ToneEnvelopeSpec, channels: u16) -> Self {
        Self {
            envelope,
            channels: channels.max(1) as usize,
            phase_counter: 0,
        }
    }

    pub fn envelope(&self) -> &ToneEnvelopeSpec {
        &self.envelope
    }

    /// Interleaved sample count of one tone instance
    pub fn buffer_len(&self) -> usize {
        self.envelope.sample_count() * self.channels
    }

    /// Current value of the phase counter
    pub fn phase_counter(&self) -> u64 {
        self.phase_counter
    }

    /// Fill `out` with one tone instance.
    ///
    /// `out` is interpreted as interleaved frames; every channel of a frame
    /// carries the same value. Frames past the tone length are silent.
    pub fn synthesize(&mut self, out: &mut [f32]) {
        let frequency = self.envelope.frequency() as u64;
        let sample_rate = self.envelope.sample_rate() as f64;

        for (i, frame) in out.chunks_mut(self.channels).enumerate() {
            let phase = (self.phase_counter * frequency) as f64 / sample_rate;
            let raw = (phase * TAU).sin() as f32;
            frame.fill(self.envelope.envelope(i) * raw);
            self.phase_counter += 1;
        }

        self.phase_counter %= self.envelope.sample_rate() as u64;
    }
}
