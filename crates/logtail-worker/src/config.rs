//! Worker configuration.

use logtail::config::{default_config_path, ConfigError, EffectiveConfig, Profile};
use logtail::Settings;
use logtail_protocol::{ops::names, PROTOCOL_MAX, PROTOCOL_MIN};

/// Worker configuration settings.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Minimum supported protocol version.
    pub protocol_min: i32,
    /// Maximum supported protocol version.
    pub protocol_max: i32,
    /// Supported operations.
    pub features: Vec<String>,
    /// Log root, request defaults and scan limits.
    pub settings: Settings,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self::with_settings(Profile::default().defaults())
    }
}

impl WorkerConfig {
    /// Worker configuration serving `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            protocol_min: PROTOCOL_MIN,
            protocol_max: PROTOCOL_MAX,
            features: vec![names::LOGS.to_string()],
            settings,
        }
    }

    /// Load from `$LOGTAIL_PROFILE` and the default config file.
    ///
    /// Returns the profile too, so the caller can pick its log filter before
    /// anything else is logged. An unrecognized `$LOGTAIL_PROFILE` is an error.
    pub fn load() -> Result<(Self, Profile), ConfigError> {
        let profile = Profile::from_env()?;
        let config = EffectiveConfig::build(profile, default_config_path().as_deref(), None)?;
        Ok((Self::with_settings(config.settings), profile))
    }
}
