//! Built-in profile defaults (layer 1)

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use super::effective::ConfigError;
use super::settings::{ScanConfig, Settings};

/// Environment variable selecting the profile when none is given explicitly.
pub const PROFILE_ENV: &str = "LOGTAIL_PROFILE";

/// Named set of built-in defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Development,
    Testing,
    #[default]
    Production,
}

impl Profile {
    /// Built-in settings for this profile.
    pub fn defaults(&self) -> Settings {
        let (log_root, default_page_size) = match self {
            Profile::Development | Profile::Testing => (PathBuf::from("."), 1000),
            Profile::Production => (PathBuf::from("/var/log"), 5000),
        };
        Settings {
            log_root,
            default_num_lines: 1000,
            default_page_size,
            scan: ScanConfig::default(),
        }
    }

    /// `tracing` filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Profile::Development => "debug",
            Profile::Testing => "warn",
            Profile::Production => "info",
        }
    }

    /// Parse a profile name, as found in `$LOGTAIL_PROFILE`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Profile::Development),
            "testing" | "test" => Some(Profile::Testing),
            "production" | "prod" => Some(Profile::Production),
            _ => None,
        }
    }

    /// Profile named by `$LOGTAIL_PROFILE`, or the default when it is unset.
    ///
    /// A set but unrecognized value is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var_os(PROFILE_ENV))
    }

    fn from_env_value(value: Option<OsString>) -> Result<Self, ConfigError> {
        let Some(value) = value else {
            return Ok(Self::default());
        };
        let name = value.to_string_lossy();
        Self::from_name(&name).ok_or_else(|| ConfigError::UnknownProfile(name.into_owned()))
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Development => write!(f, "development"),
            Profile::Testing => write!(f, "testing"),
            Profile::Production => write!(f, "production"),
        }
    }
}
