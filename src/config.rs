//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/coursecat/coursecat.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `COURSECAT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{expand_env_vars, MalformedLinePolicy};

/// Unified configuration for coursecat.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Catalog file used when a command is given no path
    pub catalog: Option<PathBuf>,
    /// Handling of lines that are not valid courses
    pub on_malformed: MalformedLinePolicy,
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub catalog: Option<PathBuf>,
    pub on_malformed: Option<MalformedLinePolicy>,
}

/// Get the XDG config directory for coursecat.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coursecat").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("coursecat.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional extra config file; it must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Scalar merge: overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            catalog: overlay.catalog.clone().or_else(|| self.catalog.clone()),
            on_malformed: overlay.on_malformed.unwrap_or(self.on_malformed),
        }
    }

    /// Apply COURSECAT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("COURSECAT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("catalog") {
            settings.catalog = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("on_malformed") {
            settings.on_malformed = parse_policy(&val)?;
        }

        Ok(settings)
    }

    /// Expand `~` and `$VAR` in the catalog path.
    fn expand_paths(&mut self) {
        if let Some(catalog) = &self.catalog {
            let expanded = expand_env_vars(catalog.to_string_lossy().as_ref());
            self.catalog = Some(PathBuf::from(expanded));
        }
    }

    /// Render as TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

fn parse_policy(value: &str) -> Result<MalformedLinePolicy, ApplicationError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "skip" => Ok(MalformedLinePolicy::Skip),
        "fail" => Ok(MalformedLinePolicy::Fail),
        other => Err(ApplicationError::Config {
            message: format!("on_malformed must be 'skip' or 'fail', got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_base_values_not_in_overlay() {
        let base = Settings {
            catalog: Some(PathBuf::from("/data/courses.csv")),
            on_malformed: MalformedLinePolicy::Skip,
        };
        let overlay = RawSettings {
            catalog: None,
            on_malformed: Some(MalformedLinePolicy::Fail),
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.catalog, Some(PathBuf::from("/data/courses.csv")));
        assert_eq!(merged.on_malformed, MalformedLinePolicy::Fail);
    }

    #[test]
    fn parse_policy_rejects_unknown_value() {
        assert!(parse_policy("Fail").is_ok());
        assert!(parse_policy("ignore").is_err());
    }
}
