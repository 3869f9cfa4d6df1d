#![allow(clippy::multiple_crate_versions)]

use bgchanger::app::App;
use bgchanger::config::ConfigFile;
use bgchanger::desktop::GSettings;
use bgchanger::editor::Editor;
use bgchanger::error::{BgError, Result};
use bgchanger::ipc::{client::IpcClient, server::IpcServer, AppStatus, Command, Response};
use bgchanger::tray::BackgroundTray;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bgchanger")]
#[command(about = "Set a random desktop background from a directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the tray daemon (default)
    Daemon,
    /// Change the background now
    Change,
    /// Show the last applied background
    Status,
    /// Stop the daemon
    Quit,
    /// Open the config file in an editor
    Edit,
    /// Print the config file path
    ConfigPath,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Daemon) => {
            tracing::info!("Starting bgchanger daemon");
            run_daemon().await
        }
        Some(Commands::Change) => run_client(Command::Change).await,
        Some(Commands::Status) => run_client(Command::Status).await,
        Some(Commands::Quit) => run_client(Command::Quit).await,
        Some(Commands::Edit) => run_edit().await,
        Some(Commands::ConfigPath) => {
            println!("{}", ConfigFile::locate()?.path().display());
            Ok(())
        }
    }
}

async fn run_daemon() -> Result<()> {
    if IpcClient::new()?.is_daemon_running().await {
        return Err(BgError::Other("bgchanger is already running".to_string()));
    }

    let (config_file, config) = match ConfigFile::load_default(None).await {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Failed to open config file: {e}");
            std::process::exit(1);
        }
    };

    let (command_tx, command_rx) = mpsc::channel::<Command>(32);
    let (status_tx, status_rx) = mpsc::channel::<AppStatus>(32);

    let ipc_server = IpcServer::new(command_tx.clone(), status_rx)?;
    tokio::spawn(async move {
        if let Err(e) = ipc_server.start().await {
            tracing::error!("IPC server error: {e}");
        }
    });

    let settings = Arc::new(GSettings::new());
    if !settings.is_available() {
        tracing::warn!("gsettings not found in PATH, background changes will fail");
    }

    let tray = BackgroundTray::new(command_tx, config.interval).spawn();

    tracing::info!("Daemon started, waiting for commands");
    App::new(config, config_file, settings)
        .with_status_updates(status_tx)
        .run(command_rx)
        .await;

    tray.shutdown();
    Ok(())
}

async fn run_edit() -> Result<()> {
    let config_file = ConfigFile::locate()?;
    config_file.ensure_exists()?;

    let editor = Editor::resolve(config_file.editor_override().as_deref())?;
    editor.open(config_file.path()).await?;

    if IpcClient::new()?.is_daemon_running().await {
        println!("Restart bgchanger to apply the new config");
    }
    Ok(())
}

async fn run_client(cmd: Command) -> Result<()> {
    let client = IpcClient::new()?;
    let response = client.send_command(cmd).await?;

    match response {
        Response::Ok => {
            println!("OK");
        }
        Response::Status(status) => match status.background {
            Some(background) => {
                println!("Background: {}", background.display());
                if let Some(changed_at) = status.changed_at {
                    println!("Changed at: {changed_at}");
                }
            }
            None => println!("Background not changed yet"),
        },
        Response::Error(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    Ok(())
}
