//! Configuration module for bgchanger
//!
//! Loads config from `$XDG_CONFIG_HOME/bgchanger/config.json` or `~/.config/bgchanger/config.json`.
//! A missing file is created from an embedded template and opened in an editor
//! before being parsed, so the first run always ends with a config on disk.
//!
//! # Example
//!
//! ```no_run
//! use bgchanger::config::ConfigFile;
//!
//! # async fn run() -> bgchanger::Result<()> {
//! let file = ConfigFile::locate()?;
//! let config = file.load_or_create(None).await?;
//! println!("Pictures: {}", config.pictures_dir().display());
//! println!("Interval: {}", config.interval);
//! # Ok(())
//! # }
//! ```

pub mod interval;
pub mod schema;

pub use interval::Interval;
pub use schema::Config;

use crate::editor::Editor;
use crate::error::{BgError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "bgchanger";
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Written to disk the first time the program runs
pub const CONFIG_TEMPLATE: &str = include_str!("../../config/config.json.example");

/// Location of the per-user config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    /// Default per-user location
    pub fn locate() -> Result<Self> {
        let config_home = dirs::config_dir().ok_or_else(|| {
            BgError::Config("cannot determine config directory (is HOME set?)".to_string())
        })?;
        Ok(Self::in_dir(config_home.join(APP_NAME)))
    }

    /// Config file inside an explicit directory
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CONFIG_FILE_NAME),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the template if no config file exists yet
    ///
    /// Returns `true` when the file was created.
    pub fn ensure_exists(&self) -> Result<bool> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                BgError::Config(format!(
                    "Failed to create config path '{}': {e}",
                    dir.display()
                ))
            })?;
        }
        if self.path.exists() {
            return Ok(false);
        }

        tracing::info!(
            "Config file not found, creating {} from template",
            self.path.display()
        );
        fs::write(&self.path, CONFIG_TEMPLATE)
            .map_err(|e| BgError::Config(format!("Failed to create config file: {e}")))?;
        Ok(true)
    }

    /// Read and validate the config
    ///
    /// On first run the template is written and opened in an editor
    /// (`editor_cmd`, else the environment's) before being parsed.
    ///
    /// # Errors
    /// - Returns error if the config directory cannot be created
    /// - Returns error if the editor fails on first-run creation
    /// - Returns error if the file is not valid JSON or fails validation
    pub async fn load_or_create(&self, editor_cmd: Option<&str>) -> Result<Config> {
        tracing::info!("Trying to load config file {}", self.path.display());

        if self.ensure_exists()? {
            let editor = Editor::resolve(editor_cmd)?;
            editor.open(&self.path).await?;
            if !editor.waits() {
                tracing::warn!(
                    "`{}` does not wait for the file to be closed; edit {} and start bgchanger again",
                    editor.program(),
                    self.path.display()
                );
            }
        }

        let data = fs::read_to_string(&self.path)
            .map_err(|e| BgError::Config(format!("Failed to read config file: {e}")))?;
        Config::from_json(&data)
    }

    /// Locate the per-user config file and load it
    ///
    /// Every startup failure, including an unknown config directory, comes
    /// back as an error so the caller can log it before exiting.
    pub async fn load_default(editor_cmd: Option<&str>) -> Result<(Self, Config)> {
        let file = Self::locate()?;
        let config = file.load_or_create(editor_cmd).await?;
        Ok((file, config))
    }

    /// Editor override from the file on disk, if it parses
    #[must_use]
    pub fn editor_override(&self) -> Option<String> {
        let data = fs::read_to_string(&self.path).ok()?;
        let config = Config::from_json(&data).ok()?;
        config.editor().map(str::to_string)
    }
}
