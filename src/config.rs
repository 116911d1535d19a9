//! Settings file for podcheck
//!
//! Settings are read from `--config <path>` or `~/.podcheck/config.toml` when
//! that file exists. Command-line flags take precedence over the file.

use std::fs;
use std::path::{Path, PathBuf};

use podcheck_checks::RESTRICTED_LABEL;
use podcheck_k8s::ClusterConfig;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("restricted_label must not be empty")]
    EmptyRestrictedLabel,
}

/// Values that can come from the settings file
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Kubeconfig file used for live queries
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context used for live queries
    pub context: Option<String>,

    /// Namespace label that marks a restrictive security policy
    pub restricted_label: Option<String>,
}

impl Settings {
    /// Get the default settings file path
    pub fn default_path() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(home.join(".podcheck").join("config.toml"))
    }

    /// Load settings from an explicit path, or from the default path if present
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command-line values on top of the file
    pub fn with_overrides(mut self, kubeconfig: Option<PathBuf>, context: Option<String>) -> Self {
        if kubeconfig.is_some() {
            self.kubeconfig = kubeconfig;
        }
        if context.is_some() {
            self.context = context;
        }
        self
    }

    pub fn cluster(&self) -> ClusterConfig {
        ClusterConfig {
            kubeconfig: self.kubeconfig.clone(),
            context: self.context.clone(),
        }
    }

    /// The restrictive-policy label, falling back to the OpenShift run-level label
    pub fn restricted_label(&self) -> Result<&str, ConfigError> {
        match self.restricted_label.as_deref() {
            None => Ok(RESTRICTED_LABEL),
            Some("") => Err(ConfigError::EmptyRestrictedLabel),
            Some(label) => Ok(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full() {
        let content = r#"
kubeconfig = "/etc/podcheck/kubeconfig"
context = "prod"
restricted_label = "example.com/policy"
"#;
        let settings = Settings::parse(Path::new("config.toml"), content).unwrap();
        assert_eq!(settings.context.as_deref(), Some("prod"));
        assert_eq!(settings.restricted_label().unwrap(), "example.com/policy");
        assert_eq!(
            settings.cluster().kubeconfig,
            Some(PathBuf::from("/etc/podcheck/kubeconfig"))
        );
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = Settings::parse(Path::new("config.toml"), "").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.restricted_label().unwrap(), RESTRICTED_LABEL);
        assert!(settings.cluster().is_inferred());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Settings::parse(Path::new("config.toml"), "contxt = \"prod\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_empty_label_rejected() {
        let settings = Settings {
            restricted_label: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            settings.restricted_label(),
            Err(ConfigError::EmptyRestrictedLabel)
        ));
    }

    #[test]
    fn test_flags_override_file() {
        let settings = Settings {
            kubeconfig: Some(PathBuf::from("/from/file")),
            context: Some("file".to_string()),
            restricted_label: None,
        }
        .with_overrides(None, Some("flag".to_string()));

        assert_eq!(settings.kubeconfig, Some(PathBuf::from("/from/file")));
        assert_eq!(settings.context.as_deref(), Some("flag"));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "context = \"staging\"").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.context.as_deref(), Some("staging"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Settings::load(Some(Path::new("/nonexistent/podcheck.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
