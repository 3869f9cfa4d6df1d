use crate::config::interval::Interval;
use crate::error::{BgError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub pictures_dir: PathBuf,
    #[serde(default)]
    pub interval: Interval,
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default)]
    pub change_on_start: bool,
}

impl Config {
    /// Parse and validate a JSON config document
    pub fn from_json(data: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(data)
            .map_err(|e| BgError::Config(format!("Failed to parse config file: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Sanity checks that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.pictures_dir.as_os_str().is_empty() {
            return Err(BgError::Config("pictures_dir cannot be empty".to_string()));
        }
        Ok(())
    }

    /// Pictures directory with a leading `~` expanded to the home directory
    #[must_use]
    pub fn pictures_dir(&self) -> PathBuf {
        expand_home(&self.pictures_dir)
    }

    /// Editor override, ignoring blank values
    #[must_use]
    pub fn editor(&self) -> Option<&str> {
        self.editor
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_json(
            r#"{
                "pictures_dir": "/srv/wallpapers",
                "interval": "15m",
                "editor": "gedit --wait",
                "change_on_start": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.pictures_dir, PathBuf::from("/srv/wallpapers"));
        assert_eq!(config.interval.period(), Some(Duration::from_secs(900)));
        assert_eq!(config.editor(), Some("gedit --wait"));
        assert!(config.change_on_start);
    }

    #[test]
    fn test_optional_fields_default() {
        let config = Config::from_json(r#"{"pictures_dir": "/tmp/bg"}"#).unwrap();
        assert!(!config.interval.is_enabled());
        assert_eq!(config.editor(), None);
        assert!(!config.change_on_start);
    }

    #[test]
    fn test_empty_pictures_dir_rejected() {
        let err = Config::from_json(r#"{"pictures_dir": "", "interval": "1h"}"#).unwrap_err();
        assert!(matches!(err, BgError::Config(_)));
        assert!(err.to_string().contains("pictures_dir cannot be empty"));
    }

    #[test]
    fn test_missing_pictures_dir_rejected() {
        let err = Config::from_json(r#"{"interval": "1h"}"#).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_bad_interval_rejected() {
        let err = Config::from_json(r#"{"pictures_dir": "/tmp", "interval": "often"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid duration"));
    }

    #[test]
    fn test_blank_editor_is_unset() {
        let config = Config::from_json(r#"{"pictures_dir": "/tmp", "editor": "  "}"#).unwrap();
        assert_eq!(config.editor(), None);
    }

    #[test]
    fn test_tilde_expansion() {
        let config = Config::from_json(r#"{"pictures_dir": "~/Pictures/bg"}"#).unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.pictures_dir(), home.join("Pictures/bg"));
        }

        let absolute = Config::from_json(r#"{"pictures_dir": "/srv/bg"}"#).unwrap();
        assert_eq!(absolute.pictures_dir(), PathBuf::from("/srv/bg"));
    }
}
