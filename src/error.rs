use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bgchanger
#[derive(Error, Debug)]
pub enum BgError {
    #[error("Config error: {0}\n\nTroubleshooting:\n- Check config file: ~/.config/bgchanger/config.json\n- Run `bgchanger edit` to fix it\n- Run with RUST_LOG=debug for more details")]
    Config(String),

    #[error("no pictures found in '{}'\n\nTroubleshooting:\n- Supported suffixes: png, jpg, jpeg\n- Check pictures_dir in config", .0.display())]
    NoPictures(PathBuf),

    #[error("Command error: {0}\n\nTroubleshooting:\n- Is gsettings installed and in PATH?\n- Is a GNOME session running?")]
    Command(String),

    #[error("Editor error: {0}\n\nTroubleshooting:\n- Set \"editor\" in config, or $VISUAL / $EDITOR\n- Make sure the editor waits until the file is closed")]
    Editor(String),

    #[error("IPC error: {0}\n\nTroubleshooting:\n- Is the daemon running? Start with: bgchanger\n- Check socket path: $XDG_RUNTIME_DIR/bgchanger.sock\n- Try restarting the daemon")]
    Ipc(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BgError>;
