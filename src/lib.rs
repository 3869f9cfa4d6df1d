#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod background;
pub mod config;
pub mod desktop;
pub mod editor;
pub mod error;
pub mod ipc;
pub mod tray;

pub use error::{BgError, Result};
