pub mod gsettings;
pub mod theme;

use crate::error::{BgError, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

pub use gsettings::GSettings;
pub use theme::ThemeVariant;

/// Key/value access to the desktop's settings store
#[async_trait]
pub trait DesktopSettings: Send + Sync {
    /// Read the raw printed value of `schema key`
    async fn get(&self, schema: &str, key: &str) -> Result<String>;

    /// Write `value` to `schema key`
    async fn set(&self, schema: &str, key: &str, value: &str) -> Result<()>;
}

pub const DEFAULT_OPENER: &str = "xdg-open";

/// Show a directory in the user's file manager via `opener`
pub async fn open_directory(opener: &str, dir: &Path) -> Result<()> {
    tracing::info!("Opening directory {} with {opener}", dir.display());

    let status = Command::new(opener)
        .arg(dir)
        .status()
        .await
        .map_err(|e| BgError::Command(format!("Failed to run {opener}: {e}")))?;

    if !status.success() {
        return Err(BgError::Command(format!(
            "{opener} {} exited with {status}",
            dir.display()
        )));
    }
    Ok(())
}
