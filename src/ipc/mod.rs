pub mod client;
pub mod server;

use crate::error::{BgError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Commands accepted by the event loop, from the tray menu or the socket
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Change,
    EditConfig,
    OpenDirectory,
    Status,
    Quit,
}

/// IPC Responses
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Response {
    Ok,
    Status(AppStatus),
    Error(String),
}

/// Last applied background, as reported by `bgchanger status`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppStatus {
    pub background: Option<PathBuf>,
    pub changed_at: Option<String>,
}

impl AppStatus {
    #[must_use]
    pub fn changed_now(background: PathBuf) -> Self {
        Self {
            background: Some(background),
            changed_at: Some(chrono::Local::now().to_rfc3339()),
        }
    }
}

/// Socket path under `XDG_RUNTIME_DIR`
pub fn socket_path() -> Result<PathBuf> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .or_else(|_| -> std::result::Result<String, std::env::VarError> {
            #[cfg(target_os = "linux")]
            {
                let uid = nix::unistd::getuid();
                Ok(format!("/run/user/{uid}"))
            }
            #[cfg(not(target_os = "linux"))]
            {
                Err(std::env::VarError::NotPresent)
            }
        })
        .map_err(|_| BgError::Ipc("XDG_RUNTIME_DIR not set".to_string()))?;

    Ok(PathBuf::from(runtime_dir).join("bgchanger.sock"))
}
