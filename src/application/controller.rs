//! Controller settings resolution and startup errors

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::config::{
    AppConfig, RemovalPolicy, StreamSpec, TargetDeviceSpec, DEFAULT_FADE_DURATION,
    DEFAULT_INTERVAL, DEFAULT_POLL_INTERVAL, DEFAULT_SCAN_INTERVAL, DEFAULT_TONE_DURATION,
};
use crate::domain::error::ToneConfigError;
use crate::domain::recording::Duration;
use crate::domain::tone::{ToneEnvelopeSpec, ToneSource, ToneSynthesizer};

use super::dispatcher::ControllerConfig;
use super::ports::{AssetError, OutputInitError, SoundAssetLoader, TimerError};

/// Errors that prevent the controller from starting
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("No target device configured. Pass --device <NAME> or run 'heartbeat-tone config set device <NAME>'")]
    MissingDevice,

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error("Invalid tone settings: {0}")]
    Tone(#[from] ToneConfigError),

    #[error("Audio subsystem unavailable: {0}")]
    Output(#[from] OutputInitError),

    #[error("Failed to load sound asset: {0}")]
    Asset(#[from] AssetError),

    #[error("Timer service unavailable: {0}")]
    Timer(#[from] TimerError),

    #[error("Failed to start hotplug watcher: {0}")]
    Watcher(std::io::Error),

    #[error("Failed to install signal handlers: {0}")]
    Signals(std::io::Error),

    #[error("Controller loop terminated abnormally: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

impl ControllerError {
    /// Whether the error stems from user-supplied settings
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::MissingDevice | Self::InvalidValue { .. } | Self::Tone(_)
        )
    }
}

/// Fully validated controller settings
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    pub target: TargetDeviceSpec,
    pub envelope: ToneEnvelopeSpec,
    pub interval: Duration,
    pub poll_interval: Duration,
    pub scan_interval: Duration,
    pub removal_policy: RemovalPolicy,
    pub asset: Option<PathBuf>,
}

impl ControllerSettings {
    /// Validate a merged config. Unlike the lenient `*_or_default`
    /// accessors, values that are set but malformed are rejected.
    pub fn resolve(config: &AppConfig) -> Result<Self, ControllerError> {
        let name = config.device_name().ok_or(ControllerError::MissingDevice)?;

        let stream = StreamSpec::new(
            config.channels_or_default(),
            config.sample_rate_or_default(),
        )?;
        let tone_duration =
            duration(&config.tone_duration, "tone_duration", DEFAULT_TONE_DURATION)?;
        let fade_duration =
            duration(&config.fade_duration, "fade_duration", DEFAULT_FADE_DURATION)?;
        let envelope = ToneEnvelopeSpec::new(
            tone_duration,
            fade_duration,
            config.frequency_or_default(),
            stream.sample_rate,
        )?;

        let removal_policy = match config.on_remove.as_deref() {
            Some(value) => value
                .parse::<RemovalPolicy>()
                .map_err(|message| ControllerError::InvalidValue {
                    key: "on_remove".into(),
                    message,
                })?,
            None => RemovalPolicy::default(),
        };

        Ok(Self {
            target: TargetDeviceSpec::new(name, stream),
            envelope,
            interval: duration(&config.interval, "interval", DEFAULT_INTERVAL)?,
            poll_interval: duration(
                &config.poll_interval,
                "poll_interval",
                DEFAULT_POLL_INTERVAL,
            )?,
            scan_interval: duration(
                &config.scan_interval,
                "scan_interval",
                DEFAULT_SCAN_INTERVAL,
            )?,
            removal_policy,
            asset: config
                .asset
                .as_deref()
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            target: self.target.clone(),
            interval: self.interval,
            poll_interval: self.poll_interval,
            removal_policy: self.removal_policy,
        }
    }

    /// Load the configured recording, or fall back to synthesizing the tone
    pub fn tone_source(
        &self,
        loader: &dyn SoundAssetLoader,
    ) -> Result<ToneSource, ControllerError> {
        let stream = self.target.stream();
        match &self.asset {
            Some(path) => Ok(ToneSource::Recorded(loader.load(path, stream)?)),
            None => Ok(ToneSource::Synthesized(ToneSynthesizer::new(
                self.envelope,
                stream.channels,
            ))),
        }
    }
}

fn duration(
    value: &Option<String>,
    key: &str,
    fallback: Duration,
) -> Result<Duration, ControllerError> {
    match value {
        Some(s) => s.parse::<Duration>().map_err(|e| ControllerError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
        None => Ok(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    struct FixedLoader(Result<Vec<f32>, AssetError>);

    impl SoundAssetLoader for FixedLoader {
        fn load(&self, _path: &Path, _spec: StreamSpec) -> Result<Vec<f32>, AssetError> {
            self.0.clone()
        }
    }

    fn with_device() -> AppConfig {
        AppConfig {
            device: Some("Foo".into()),
            ..AppConfig::empty()
        }
    }

    #[test]
    fn resolves_defaults() {
        let settings = ControllerSettings::resolve(&with_device()).unwrap();
        assert_eq!(settings.target.name(), "Foo");
        assert_eq!(settings.target.stream(), StreamSpec::default());
        assert_eq!(settings.envelope.sample_count(), 16000);
        assert_eq!(settings.envelope.fade_sample_count(), 1200);
        assert_eq!(settings.interval, Duration::from_secs(4));
        assert_eq!(settings.removal_policy, RemovalPolicy::DisarmIfStopped);
        assert!(settings.asset.is_none());
    }

    #[test]
    fn missing_device_is_rejected() {
        let err = ControllerSettings::resolve(&AppConfig::defaults()).unwrap_err();
        assert!(matches!(err, ControllerError::MissingDevice));
        assert!(err.is_usage_error());
    }

    #[test]
    fn malformed_duration_names_the_key() {
        let config = AppConfig {
            interval: Some("soon".into()),
            ..with_device()
        };
        match ControllerSettings::resolve(&config).unwrap_err() {
            ControllerError::InvalidValue { key, .. } => assert_eq!(key, "interval"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn frequency_above_nyquist_is_rejected() {
        let config = AppConfig {
            frequency: Some(5000),
            ..with_device()
        };
        let err = ControllerSettings::resolve(&config).unwrap_err();
        assert!(matches!(
            err,
            ControllerError::Tone(ToneConfigError::FrequencyOutOfRange {
                frequency: 5000,
                nyquist: 4000
            })
        ));
    }

    #[test]
    fn invalid_removal_policy_is_rejected() {
        let config = AppConfig {
            on_remove: Some("sometimes".into()),
            ..with_device()
        };
        assert!(matches!(
            ControllerSettings::resolve(&config),
            Err(ControllerError::InvalidValue { .. })
        ));
    }

    #[test]
    fn synthesized_source_uses_stream_channels() {
        let config = AppConfig {
            channels: Some(2),
            ..with_device()
        };
        let settings = ControllerSettings::resolve(&config).unwrap();
        let source = settings.tone_source(&FixedLoader(Ok(vec![]))).unwrap();
        assert_eq!(source.buffer_len(), 32000);
    }

    #[test]
    fn asset_replaces_synthesized_tone() {
        let config = AppConfig {
            asset: Some("/tmp/beep.wav".into()),
            ..with_device()
        };
        let settings = ControllerSettings::resolve(&config).unwrap();
        let source = settings
            .tone_source(&FixedLoader(Ok(vec![0.5; 10])))
            .unwrap();
        assert!(matches!(source, ToneSource::Recorded(ref s) if s.len() == 10));

        let err = settings
            .tone_source(&FixedLoader(Err(AssetError::Empty("beep.wav".into()))))
            .unwrap_err();
        assert!(matches!(err, ControllerError::Asset(_)));
        assert!(!err.is_usage_error());
    }
}
