//! Effective configuration with provenance
//!
//! Captures the merged settings plus where each contributing layer came
//! from, so `logtail config` can show exactly what a scan will use.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use toml::{Table, Value};

use super::defaults::Profile;
use super::merge::merge_layers;
use super::settings::Settings;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "LOGTAIL_CONFIG";

/// Config file consulted when neither --config nor $LOGTAIL_CONFIG is given.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/logtail/logtail.toml";

/// Origin of a configuration layer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConfigOrigin {
    Builtin,
    File,
    Cli,
}

/// A contributing layer with provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSource {
    /// Origin of this layer
    pub origin: ConfigOrigin,

    /// File path (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// SHA-256 digest of the raw file bytes (None for builtin/cli)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Merged settings with provenance
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    /// Profile the built-in layer came from
    pub profile: Profile,

    /// The merged, validated settings
    pub settings: Settings,

    /// Contributing layers in precedence order
    pub sources: Vec<ConfigSource>,
}

impl EffectiveConfig {
    /// Build from the profile defaults, an optional file, and CLI overrides.
    ///
    /// A `config_path` that is given must exist.
    pub fn build(
        profile: Profile,
        config_path: Option<&Path>,
        cli_overrides: Option<Table>,
    ) -> Result<Self, ConfigError> {
        let mut layers = Vec::new();
        let mut sources = Vec::new();

        // Layer 1: profile defaults
        layers.push(settings_table(&profile.defaults())?);
        sources.push(ConfigSource {
            origin: ConfigOrigin::Builtin,
            path: None,
            digest: None,
        });

        // Layer 2: config file
        if let Some(path) = config_path {
            let (table, digest) = load_toml_file(path)?;
            layers.push(table);
            sources.push(ConfigSource {
                origin: ConfigOrigin::File,
                path: Some(path.to_string_lossy().to_string()),
                digest: Some(digest),
            });
        }

        // Layer 3: CLI overrides
        if let Some(cli) = cli_overrides {
            if !cli.is_empty() {
                layers.push(cli);
                sources.push(ConfigSource {
                    origin: ConfigOrigin::Cli,
                    path: None,
                    digest: None,
                });
            }
        }

        let settings: Settings = Value::Table(merge_layers(layers))
            .try_into()
            .map_err(ConfigError::Invalid)?;
        settings.validate()?;

        Ok(Self {
            profile,
            settings,
            sources,
        })
    }

    /// Pretty JSON rendering
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Config file to load when none is named on the command line.
///
/// `$LOGTAIL_CONFIG` wins and must exist; the system path is used only when
/// present.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let system = PathBuf::from(SYSTEM_CONFIG_PATH);
    system.is_file().then_some(system)
}

fn settings_table(settings: &Settings) -> Result<Table, ConfigError> {
    match Value::try_from(settings).map_err(ConfigError::Serialize)? {
        Value::Table(table) => Ok(table),
        _ => Ok(Table::new()),
    }
}

fn load_toml_file(path: &Path) -> Result<(Table, String), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let digest = hex::encode(Sha256::digest(content.as_bytes()));
    let table: Table = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((table, digest))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(#[source] toml::de::Error),

    #[error("failed to encode defaults: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("unknown profile {0:?} (expected development, testing or production)")]
    UnknownProfile(String),

    #[error("{field} must be in (0, {max}], got {value}")]
    OutOfBounds {
        field: &'static str,
        value: u64,
        max: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_builtin_only() {
        let config = EffectiveConfig::build(Profile::Production, None, None).unwrap();
        assert_eq!(config.settings, Profile::Production.defaults());
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].origin, ConfigOrigin::Builtin);
    }

    #[test]
    fn test_file_layer_overrides_defaults() {
        let file = write_config("log_root = \"/srv/logs\"\n\n[scan]\nchunk_size = 4096\n");
        let config = EffectiveConfig::build(Profile::Development, Some(file.path()), None).unwrap();

        assert_eq!(config.settings.log_root, PathBuf::from("/srv/logs"));
        assert_eq!(config.settings.scan.chunk_size, 4096);
        assert_eq!(config.settings.scan.max_lines, 200_000);
        assert_eq!(config.settings.default_page_size, 1000);

        let source = &config.sources[1];
        assert_eq!(source.origin, ConfigOrigin::File);
        assert_eq!(source.digest.as_ref().unwrap().len(), 64);
    }

    #[test]
    fn test_cli_wins_over_file() {
        let file = write_config("default_page_size = 300\n[scan]\nread_timeout_ms = 2000\n");
        let cli: Table = toml::from_str("default_page_size = 50\n[scan]\nread_timeout_ms = 100\n").unwrap();
        let config = EffectiveConfig::build(Profile::Production, Some(file.path()), Some(cli)).unwrap();

        assert_eq!(config.settings.default_page_size, 50);
        assert_eq!(config.settings.scan.read_timeout_ms, 100);
        assert_eq!(config.sources.len(), 3);
        assert_eq!(config.sources[2].origin, ConfigOrigin::Cli);
    }

    #[test]
    fn test_empty_cli_layer_is_skipped() {
        let config = EffectiveConfig::build(Profile::Testing, None, Some(Table::new())).unwrap();
        assert_eq!(config.sources.len(), 1);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = EffectiveConfig::build(Profile::Production, Some(&dir.path().join("absent.toml")), None);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_unparsable_file() {
        let file = write_config("this is = = not toml");
        let result = EffectiveConfig::build(Profile::Production, Some(file.path()), None);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let file = write_config("[scan]\nchunk_sise = 10\n");
        let result = EffectiveConfig::build(Profile::Production, Some(file.path()), None);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let file = write_config("[scan]\nmax_lines = 0\n");
        let result = EffectiveConfig::build(Profile::Production, Some(file.path()), None);
        assert!(matches!(
            result,
            Err(ConfigError::OutOfBounds { field: "scan.max_lines", .. })
        ));
    }

    #[test]
    fn test_to_json() {
        let config = EffectiveConfig::build(Profile::Testing, None, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(value["profile"], "testing");
        assert_eq!(value["settings"]["scan"]["chunk_size"], 1048576);
        assert_eq!(value["sources"][0]["origin"], "builtin");
    }
}
