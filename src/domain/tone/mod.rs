//! Tone generation

mod envelope;
mod source;
mod synthesizer;

pub use envelope::ToneEnvelopeSpec;
pub use source::ToneSource;
pub use synthesizer::ToneSynthesizer;
