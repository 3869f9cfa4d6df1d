use crate::desktop::DesktopSettings;
use crate::error::{BgError, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// `DesktopSettings` backed by the `gsettings` command line tool
///
/// Each call spawns one `gsettings` process and waits for it.
#[derive(Debug, Clone)]
pub struct GSettings {
    program: String,
}

impl Default for GSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl GSettings {
    #[must_use]
    pub fn new() -> Self {
        Self {
            program: "gsettings".to_string(),
        }
    }

    /// Use a different binary (for testing)
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check that the binary can be found in PATH
    #[must_use]
    pub fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }
}

#[async_trait]
impl DesktopSettings for GSettings {
    async fn get(&self, schema: &str, key: &str) -> Result<String> {
        let output = Command::new(&self.program)
            .args(["get", schema, key])
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| BgError::Command(format!("Failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            return Err(BgError::Command(format!(
                "{} get {schema} {key} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn set(&self, schema: &str, key: &str, value: &str) -> Result<()> {
        tracing::info!("Executing command: {} set {schema} {key} {value}", self.program);

        // Inherit stdio so gsettings diagnostics reach the log output
        let status = Command::new(&self.program)
            .args(["set", schema, key, value])
            .status()
            .await
            .map_err(|e| BgError::Command(format!("Failed to run {}: {e}", self.program)))?;

        if !status.success() {
            return Err(BgError::Command(format!(
                "{} set {schema} {key} exited with {status}",
                self.program
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary() {
        let settings = GSettings::with_program("bgchanger-no-such-gsettings");
        assert!(!settings.is_available());

        let err = settings
            .get("org.gnome.desktop.interface", "gtk-theme")
            .await
            .unwrap_err();
        assert!(matches!(err, BgError::Command(_)));
        assert!(err.to_string().contains("Failed to run"));
    }

    #[tokio::test]
    async fn test_non_zero_exit() {
        // `false` ignores its arguments and exits 1
        let settings = GSettings::with_program("false");
        assert!(settings.get("a", "b").await.is_err());
        assert!(settings.set("a", "b", "c").await.is_err());
    }

    #[tokio::test]
    async fn test_get_returns_stdout() {
        // `echo get <schema> <key>` stands in for gsettings
        let settings = GSettings::with_program("echo");
        let out = settings.get("org.example", "key").await.unwrap();
        assert_eq!(out.trim(), "get org.example key");
    }

    #[tokio::test]
    #[ignore = "requires a GNOME session"]
    async fn test_real_gsettings_query() {
        let settings = GSettings::new();
        let theme = settings
            .get("org.gnome.desktop.interface", "gtk-theme")
            .await
            .unwrap();
        assert!(!theme.trim().is_empty());
    }
}
