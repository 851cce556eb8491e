//! Hook configuration, sourced once at process start.
//!
//! [`HookConfig`] snapshots the process environment so that components never
//! read ambient globals themselves. An optional YAML file supplies defaults for
//! the typed settings; environment values always win over the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Public Bintray API host used when no override is configured.
pub const DEFAULT_BINTRAY_API_URL: &str = "https://api.bintray.com";

pub const ENV_BINTRAY_API_URL: &str = "BINTRAY_API_URL";
pub const ENV_ISSUE_TRACKER_URL: &str = "BINTRAY_ISSUE_TRACKER_URL";
pub const ENV_STABLE_BRANCH_PATTERN: &str = "CONAN_STABLE_BRANCH_PATTERN";

/// Configuration value object handed to every hook at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    /// Base URL of the Bintray REST API, without a trailing `/`.
    pub bintray_api_url: String,
    /// Replaces the issue-tracker URL derived from the recipe's `url`.
    ///
    /// Unlike every other setting, an explicitly empty value is kept:
    /// `Some("")` turns issue-tracker updates off.
    pub issue_tracker_url: Option<String>,
    /// Replaces the default stable-branch patterns with a single pattern.
    pub stable_branch_pattern: Option<String>,
    env: BTreeMap<String, String>,
}

impl HookConfig {
    /// Snapshot the current process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build a configuration from an explicit variable list.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env: BTreeMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let lookup = |key: &str| env.get(key).filter(|v| !v.is_empty()).cloned();

        Self {
            bintray_api_url: normalize_api_url(
                lookup(ENV_BINTRAY_API_URL).as_deref().unwrap_or(DEFAULT_BINTRAY_API_URL),
            ),
            issue_tracker_url: env.get(ENV_ISSUE_TRACKER_URL).cloned(),
            stable_branch_pattern: lookup(ENV_STABLE_BRANCH_PATTERN),
            env,
        }
    }

    /// Raw snapshot lookup. Empty values count as unset.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.env
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Fill settings the environment left unset from a config file.
    pub fn with_file(mut self, file: ConfigFile) -> Self {
        if self.var(ENV_BINTRAY_API_URL).is_none() {
            if let Some(url) = file.bintray_api_url.filter(|u| !u.is_empty()) {
                self.bintray_api_url = normalize_api_url(&url);
            }
        }
        if self.issue_tracker_url.is_none() {
            self.issue_tracker_url = file.issue_tracker_url.filter(|u| !u.is_empty());
        }
        if self.stable_branch_pattern.is_none() {
            self.stable_branch_pattern = file.stable_branch_pattern.filter(|p| !p.is_empty());
        }
        self
    }
}

impl Default for HookConfig {
    fn default() -> Self {
        Self::from_vars(std::iter::empty::<(String, String)>())
    }
}

fn normalize_api_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

// ---------------------------------------------------------------------------
// ConfigFile
// ---------------------------------------------------------------------------

/// On-disk YAML configuration. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub bintray_api_url: Option<String>,
    pub issue_tracker_url: Option<String>,
    pub stable_branch_pattern: Option<String>,
}

impl ConfigFile {
    /// Load a config file. A file containing only comments yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let parsed: Option<Self> =
            serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(parsed.unwrap_or_default())
    }

    /// `<home>/.conan/hooks/conan-hooks.yaml`
    pub fn default_path_at(home: &Path) -> PathBuf {
        home.join(".conan").join("hooks").join("conan-hooks.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let config = HookConfig::default();
        assert_eq!(config.bintray_api_url, DEFAULT_BINTRAY_API_URL);
        assert!(config.issue_tracker_url.is_none());
        assert!(config.stable_branch_pattern.is_none());
    }

    #[test]
    fn environment_overrides_are_captured() {
        let config = HookConfig::from_vars([
            (ENV_BINTRAY_API_URL, "http://localhost:8080/"),
            (ENV_ISSUE_TRACKER_URL, "https://tracker.example/issues"),
            (ENV_STABLE_BRANCH_PATTERN, "main"),
            ("BINTRAY_PASSWORD", "secret"),
        ]);
        assert_eq!(config.bintray_api_url, "http://localhost:8080");
        assert_eq!(
            config.issue_tracker_url.as_deref(),
            Some("https://tracker.example/issues")
        );
        assert_eq!(config.stable_branch_pattern.as_deref(), Some("main"));
        assert_eq!(config.var("BINTRAY_PASSWORD"), Some("secret"));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = HookConfig::from_vars([
            (ENV_BINTRAY_API_URL, ""),
            (ENV_STABLE_BRANCH_PATTERN, ""),
            ("TRAVIS", ""),
        ]);
        assert_eq!(config.bintray_api_url, DEFAULT_BINTRAY_API_URL);
        assert!(config.stable_branch_pattern.is_none());
        assert_eq!(config.var("TRAVIS"), None);
    }

    #[test]
    fn empty_issue_tracker_is_kept_and_beats_file() {
        let config = HookConfig::from_vars([(ENV_ISSUE_TRACKER_URL, "")]).with_file(ConfigFile {
            issue_tracker_url: Some("https://tracker.internal".into()),
            ..ConfigFile::default()
        });
        assert_eq!(config.issue_tracker_url.as_deref(), Some(""));
    }

    #[test]
    fn file_fills_only_unset_settings() {
        let config = HookConfig::from_vars([(ENV_STABLE_BRANCH_PATTERN, "main")]).with_file(
            ConfigFile {
                bintray_api_url: Some("https://bintray.internal/".into()),
                issue_tracker_url: Some("https://tracker.internal".into()),
                stable_branch_pattern: Some("prod".into()),
            },
        );
        assert_eq!(config.bintray_api_url, "https://bintray.internal");
        assert_eq!(config.issue_tracker_url.as_deref(), Some("https://tracker.internal"));
        assert_eq!(config.stable_branch_pattern.as_deref(), Some("main"));
    }

    #[test]
    fn environment_api_url_beats_file() {
        let config = HookConfig::from_vars([(ENV_BINTRAY_API_URL, "https://env.example")])
            .with_file(ConfigFile {
                bintray_api_url: Some("https://file.example".into()),
                ..ConfigFile::default()
            });
        assert_eq!(config.bintray_api_url, "https://env.example");
    }
}
