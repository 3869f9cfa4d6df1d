use crate::error::{BgError, Result};
use std::path::Path;
use tokio::process::Command;

/// Editors tried when neither the config nor the environment names one.
///
/// The standalone flags keep the process alive until the window closes, so the
/// config can be re-read right after. `xdg-open` returns immediately.
const FALLBACK_EDITORS: &[&str] = &[
    "gnome-text-editor --standalone",
    "gedit --standalone",
    "xdg-open",
];

/// Launchers that hand the file off to another process and exit at once
const NON_BLOCKING_OPENERS: &[&str] = &["xdg-open", "gio", "gnome-open", "kde-open"];

/// External editor command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    program: String,
    args: Vec<String>,
}

impl Editor {
    /// Build an editor from a whitespace-separated command line
    ///
    /// # Errors
    /// Returns error if the command line is blank
    pub fn new(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| BgError::Editor("editor command is empty".to_string()))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Pick an editor: explicit override, then `$VISUAL`, `$EDITOR`, then the
    /// first fallback found in PATH
    pub fn resolve(override_cmd: Option<&str>) -> Result<Self> {
        if let Some(cmd) = override_cmd.filter(|c| !c.trim().is_empty()) {
            return Self::new(cmd);
        }

        for var in ["VISUAL", "EDITOR"] {
            if let Ok(cmd) = std::env::var(var) {
                if !cmd.trim().is_empty() {
                    tracing::debug!("Using editor from ${var}: {cmd}");
                    return Self::new(&cmd);
                }
            }
        }

        FALLBACK_EDITORS
            .iter()
            .map(|cmd| Self::new(cmd))
            .filter_map(std::result::Result::ok)
            .find(|editor| which::which(&editor.program).is_ok())
            .ok_or_else(|| {
                BgError::Editor(format!(
                    "no editor found (tried $VISUAL, $EDITOR, {})",
                    FALLBACK_EDITORS.join(", ")
                ))
            })
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Whether `open` returns only after the user closes the file
    #[must_use]
    pub fn waits(&self) -> bool {
        let name = Path::new(&self.program)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.program);
        !NON_BLOCKING_OPENERS.contains(&name)
    }

    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Open `path` and wait for the editor to exit
    ///
    /// # Errors
    /// - Returns error if the editor cannot be spawned
    /// - Returns error if the editor exits with a non-zero status
    pub async fn open(&self, path: &Path) -> Result<()> {
        tracing::info!("Opening {} with `{}`", path.display(), self.command_line());

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .await
            .map_err(|e| BgError::Editor(format!("Failed to run `{}`: {e}", self.program)))?;

        if !status.success() {
            return Err(BgError::Editor(format!(
                "`{}` exited with {status}",
                self.command_line()
            )));
        }

        Ok(())
    }
}
