use crate::error::{BgError, Result};
use crate::ipc::{socket_path, Command, Response};
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

/// IPC client for sending commands to daemon
pub struct IpcClient {
    socket_path: PathBuf,
}

impl IpcClient {
    /// Create new IPC client
    pub fn new() -> Result<Self> {
        Ok(Self {
            socket_path: socket_path()?,
        })
    }

    /// Create client with custom socket path (for testing)
    #[must_use]
    pub const fn with_socket_path(socket_path: PathBuf) -> Self {
        Self { socket_path }
    }

    /// Send command to daemon and receive response
    pub async fn send_command(&self, cmd: Command) -> Result<Response> {
        let mut stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
            BgError::Ipc(format!(
                "Could not connect to daemon at {}. Is it running? Error: {e}",
                self.socket_path.display()
            ))
        })?;

        let cmd_bytes = serde_json::to_vec(&cmd)
            .map_err(|e| BgError::Ipc(format!("Failed to serialize command: {e}")))?;

        stream
            .write_all(&cmd_bytes)
            .await
            .map_err(|e| BgError::Ipc(format!("Failed to send command: {e}")))?;

        let mut buf = Vec::new();
        stream
            .read_to_end(&mut buf)
            .await
            .map_err(|e| BgError::Ipc(format!("Failed to read response: {e}")))?;

        if buf.is_empty() {
            return Err(BgError::Ipc(
                "Connection closed before response".to_string(),
            ));
        }

        serde_json::from_slice(&buf).map_err(|e| BgError::Ipc(format!("Invalid response: {e}")))
    }

    /// Whether a daemon is answering on the socket
    pub async fn is_daemon_running(&self) -> bool {
        matches!(
            self.send_command(Command::Status).await,
            Ok(Response::Status(_))
        )
    }
}
