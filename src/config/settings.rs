//! Merged settings and their bounds.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::effective::ConfigError;

/// Largest accepted chunk size (64 MiB).
const MAX_CHUNK_SIZE: u64 = 64 * 1024 * 1024;

/// Largest accepted hard line cap.
const MAX_LINE_CAP: u64 = 1_000_000;

/// Largest accepted read budget (1 hour).
const MAX_READ_TIMEOUT_MS: u64 = 3_600_000;

/// Scanner configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Bytes read per backward chunk (default: 1 MiB)
    pub chunk_size: usize,

    /// Hard cap on lines returned by one call (default: 200000)
    pub max_lines: usize,

    /// Wall-clock read budget per call in milliseconds (default: 5000)
    pub read_timeout_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1024 * 1024,
            max_lines: 200_000,
            read_timeout_ms: 5000,
        }
    }
}

impl ScanConfig {
    /// Validate bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_bounds("scan.chunk_size", self.chunk_size as u64, MAX_CHUNK_SIZE)?;
        check_bounds("scan.max_lines", self.max_lines as u64, MAX_LINE_CAP)?;
        check_bounds("scan.read_timeout_ms", self.read_timeout_ms, MAX_READ_TIMEOUT_MS)?;
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Fully merged settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Directory that caller paths are resolved against
    pub log_root: PathBuf,

    /// `num_lines` used when a request omits it
    pub default_num_lines: usize,

    /// `page_size` used when a request omits it
    pub default_page_size: usize,

    pub scan: ScanConfig,
}

impl Settings {
    /// Validate bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_bounds("default_num_lines", self.default_num_lines as u64, MAX_LINE_CAP)?;
        check_bounds("default_page_size", self.default_page_size as u64, MAX_LINE_CAP)?;
        self.scan.validate()
    }
}

fn check_bounds(field: &'static str, value: u64, max: u64) -> Result<(), ConfigError> {
    if value == 0 || value > max {
        return Err(ConfigError::OutOfBounds { field, value, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_config_valid() {
        assert!(ScanConfig::default().validate().is_ok());
    }

    #[test]
    fn test_chunk_size_zero() {
        let config = ScanConfig {
            chunk_size: 0,
            ..ScanConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfBounds { field: "scan.chunk_size", .. })
        ));
    }

    #[test]
    fn test_chunk_size_too_large() {
        let config = ScanConfig {
            chunk_size: 65 * 1024 * 1024,
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_read_timeout_bounds() {
        let zero = ScanConfig {
            read_timeout_ms: 0,
            ..ScanConfig::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(ConfigError::OutOfBounds { field: "scan.read_timeout_ms", .. })
        ));

        let long = ScanConfig {
            read_timeout_ms: 3_600_001,
            ..ScanConfig::default()
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_settings_zero_page_size() {
        let mut settings = crate::config::Profile::Testing.defaults();
        settings.default_page_size = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::OutOfBounds { field: "default_page_size", .. })
        ));
    }

    #[test]
    fn test_read_timeout_duration() {
        assert_eq!(ScanConfig::default().read_timeout(), Duration::from_secs(5));
    }
}
