//! Derived tone parameters and the fade envelope

use crate::domain::error::ToneConfigError;
use crate::domain::recording::Duration;

/// Sample-domain description of one tone instance.
/// Pure function of configuration; holds no mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneEnvelopeSpec {
    sample_count: usize,
    fade_sample_count: usize,
    frequency: u32,
    sample_rate: u32,
}

impl ToneEnvelopeSpec {
    /// Longest tone or fade: one minute at 192 kHz
    pub const MAX_SAMPLES: usize = 60 * 192_000;

    /// Derive sample counts from wall-clock durations.
    ///
    /// Fades that round to zero samples disable shaping; a tone that rounds
    /// to zero samples is rejected.
    pub fn new(
        tone_duration: Duration,
        fade_duration: Duration,
        frequency: u32,
        sample_rate: u32,
    ) -> Result<Self, ToneConfigError> {
        if sample_rate == 0 {
            return Err(ToneConfigError::ZeroSampleRate);
        }
        let nyquist = sample_rate / 2;
        if frequency == 0 || frequency > nyquist {
            return Err(ToneConfigError::FrequencyOutOfRange { frequency, nyquist });
        }
        let sample_count = bounded_samples(tone_duration, sample_rate, "Tone")?;
        if sample_count == 0 {
            return Err(ToneConfigError::EmptyTone { sample_rate });
        }
        let fade_sample_count = bounded_samples(fade_duration, sample_rate, "Fade")?;

        Ok(Self {
            sample_count,
            fade_sample_count,
            frequency,
            sample_rate,
        })
    }

    /// Samples per tone instance (N)
    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Samples per fade edge (F)
    pub const fn fade_sample_count(&self) -> usize {
        self.fade_sample_count
    }

    pub const fn frequency(&self) -> u32 {
        self.frequency
    }

    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Amplitude scale at sample index `i`, always within [0, 1].
    ///
    /// Linear ramps over the leading and trailing F samples. Where the two
    /// windows overlap (N < 2F) the more attenuating value wins.
    pub fn envelope(&self, i: usize) -> f32 {
        let n = self.sample_count;
        let f = self.fade_sample_count;
        if i >= n {
            return 0.0;
        }
        if f == 0 {
            return 1.0;
        }

        let mut amplitude: f32 = 1.0;
        if i <= f {
            amplitude = amplitude.min(i as f32 / f as f32);
        }
        if i + f >= n {
            amplitude = amplitude.min((n - i) as f32 / f as f32);
        }
        amplitude
    }
}

fn bounded_samples(
    duration: Duration,
    sample_rate: u32,
    what: &'static str,
) -> Result<usize, ToneConfigError> {
    duration
        .samples_at(sample_rate)
        .filter(|&samples| samples <= ToneEnvelopeSpec::MAX_SAMPLES)
        .ok_or(ToneConfigError::ToneTooLong {
            what,
            sample_rate,
            max_samples: ToneEnvelopeSpec::MAX_SAMPLES,
        })
}
