//! Daemon event loop
//!
//! One task owns the [`Changer`] and handles commands strictly one at a time:
//! tray clicks and socket commands arrive on a channel, the change timer ticks
//! alongside it, and `tokio::select!` picks whichever is ready.

use crate::background::Changer;
use crate::config::{Config, ConfigFile};
use crate::desktop::{self, DesktopSettings};
use crate::editor::Editor;
use crate::ipc::{AppStatus, Command};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

pub struct App {
    config: Config,
    config_file: ConfigFile,
    editor: Option<Editor>,
    opener: String,
    changer: Changer,
    status_tx: Option<mpsc::Sender<AppStatus>>,
}

impl App {
    #[must_use]
    pub fn new(
        config: Config,
        config_file: ConfigFile,
        settings: Arc<dyn DesktopSettings>,
    ) -> Self {
        let editor = match Editor::resolve(config.editor()) {
            Ok(editor) => Some(editor),
            Err(e) => {
                tracing::warn!("No usable editor, \"Edit config\" will not work: {e}");
                None
            }
        };
        let changer = Changer::new(settings, config.pictures_dir());
        Self {
            config,
            config_file,
            editor,
            opener: desktop::DEFAULT_OPENER.to_string(),
            changer,
            status_tx: None,
        }
    }

    /// Publish status after each successful change
    #[must_use]
    pub fn with_status_updates(mut self, status_tx: mpsc::Sender<AppStatus>) -> Self {
        self.status_tx = Some(status_tx);
        self
    }

    /// Override the resolved editor (for testing)
    #[must_use]
    pub fn with_editor(mut self, editor: Option<Editor>) -> Self {
        self.editor = editor;
        self
    }

    /// Use a different directory opener than `xdg-open` (for testing)
    #[must_use]
    pub fn with_opener(mut self, opener: impl Into<String>) -> Self {
        self.opener = opener.into();
        self
    }

    /// Run until `Quit` arrives or every command sender is gone
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        if self.config.change_on_start {
            self.change().await;
        }

        let mut ticker = self.config.interval.period().map(|period| {
            tracing::info!("Changing background picture every {}", self.config.interval);
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        if ticker.is_none() {
            tracing::info!("Periodic background changes disabled");
        }

        loop {
            tokio::select! {
                cmd = commands.recv() => {
                    let Some(cmd) = cmd else {
                        tracing::debug!("All command senders dropped");
                        break;
                    };
                    tracing::debug!("Received command: {cmd:?}");
                    match cmd {
                        Command::Quit => {
                            tracing::info!("Quit requested");
                            break;
                        }
                        Command::Change => self.change().await,
                        Command::EditConfig => self.edit_config().await,
                        Command::OpenDirectory => self.open_directory().await,
                        // Answered by the IPC server
                        Command::Status => {}
                    }
                }
                () = next_tick(&mut ticker) => self.change().await,
            }
        }
    }

    async fn change(&mut self) {
        let Some(picture) = self.changer.change_background().await else {
            return;
        };
        if let Some(status_tx) = &self.status_tx {
            status_tx.send(AppStatus::changed_now(picture)).await.ok();
        }
    }

    async fn edit_config(&self) {
        let Some(editor) = &self.editor else {
            tracing::error!("Error opening config file: no editor configured");
            return;
        };
        if let Err(e) = editor.open(self.config_file.path()).await {
            tracing::error!("Error opening config file: {e}");
            return;
        }
        if editor.waits() {
            tracing::info!("Config saved; restart bgchanger to apply changes");
        } else {
            tracing::info!("Restart bgchanger after saving the config to apply changes");
        }
    }

    async fn open_directory(&self) {
        if let Err(e) = desktop::open_directory(&self.opener, self.changer.pictures_dir()).await {
            tracing::error!("Error opening background directory: {e}");
        }
    }
}

/// Next timer tick, or never when periodic changes are disabled
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}
