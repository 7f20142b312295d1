//! Configuration merge system
//!
//! Settings are built from three layers, later layers winning:
//! 1. Built-in profile defaults (development, testing, production)
//! 2. Config file (--config, $LOGTAIL_CONFIG, or /etc/logtail/logtail.toml)
//! 3. CLI flags
//!
//! The merged result is immutable and handed to the scanner by value.

mod defaults;
mod effective;
mod merge;
mod settings;

pub use defaults::{Profile, PROFILE_ENV};
pub use effective::{default_config_path, ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig};
pub use merge::{merge_layers, overlay};
pub use settings::{ScanConfig, Settings};
