use bgchanger::ipc::{client::IpcClient, server::IpcServer, AppStatus, Command, Response};
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Duration;

struct TestServer {
    _dir: TempDir,
    socket_path: PathBuf,
    command_rx: mpsc::Receiver<Command>,
    status_tx: mpsc::Sender<AppStatus>,
    handle: tokio::task::JoinHandle<()>,
}

async fn start_server() -> TestServer {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let socket_path = dir.path().join("bgchanger-test.sock");

    let (command_tx, command_rx) = mpsc::channel::<Command>(32);
    let (status_tx, status_rx) = mpsc::channel::<AppStatus>(32);
    let (ready_tx, ready_rx) = oneshot::channel();

    let server = IpcServer::new(command_tx, status_rx)
        .expect("Failed to create server")
        .with_socket_path(socket_path.clone())
        .with_ready_signal(ready_tx);
    let handle = tokio::spawn(async move {
        server.start().await.ok();
    });

    tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("Server didn't start in time")
        .ok();

    assert!(
        socket_path.exists(),
        "Socket file doesn't exist at {}",
        socket_path.display()
    );

    TestServer {
        _dir: dir,
        socket_path,
        command_rx,
        status_tx,
        handle,
    }
}

#[tokio::test]
async fn test_commands_are_forwarded() {
    let mut server = start_server().await;
    let client = IpcClient::with_socket_path(server.socket_path.clone());

    for cmd in [Command::Change, Command::OpenDirectory, Command::Quit] {
        let response = client.send_command(cmd).await.expect("Failed to send command");
        assert_eq!(response, Response::Ok);

        let received = tokio::time::timeout(Duration::from_secs(1), server.command_rx.recv())
            .await
            .expect("Timeout waiting for command")
            .expect("Channel closed");
        assert_eq!(received, cmd);
    }

    server.handle.abort();
}

#[tokio::test]
async fn test_status_reports_last_background() {
    let mut server = start_server().await;
    let client = IpcClient::with_socket_path(server.socket_path.clone());

    let response = client
        .send_command(Command::Status)
        .await
        .expect("Failed to send status command");
    assert_eq!(response, Response::Status(AppStatus::default()));

    let status = AppStatus::changed_now(PathBuf::from("/srv/bg/beach.png"));
    server
        .status_tx
        .send(status.clone())
        .await
        .expect("Failed to send status");

    // Status updates are applied asynchronously
    let mut reported = None;
    for _ in 0..20 {
        if let Ok(Response::Status(s)) = client.send_command(Command::Status).await {
            if s.background.is_some() {
                reported = Some(s);
                break;
            }
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    assert_eq!(reported, Some(status));

    // Status is answered by the server, never forwarded
    assert!(server.command_rx.try_recv().is_err());
    assert!(client.is_daemon_running().await);

    server.handle.abort();
}

#[tokio::test]
async fn test_closed_event_loop_reports_error() {
    let mut server = start_server().await;
    let client = IpcClient::with_socket_path(server.socket_path.clone());

    server.command_rx.close();
    let response = client
        .send_command(Command::Change)
        .await
        .expect("Failed to send command");
    assert!(matches!(response, Response::Error(_)));

    server.handle.abort();
}

#[tokio::test]
async fn test_server_stops_when_status_sender_dropped() {
    let server = start_server().await;
    let socket_path = server.socket_path.clone();

    drop(server.status_tx);
    tokio::time::timeout(Duration::from_secs(1), server.handle)
        .await
        .expect("Server did not stop")
        .ok();

    assert!(!socket_path.exists(), "socket should be removed on shutdown");
}

#[tokio::test]
async fn test_client_error_daemon_not_running() {
    let dir = TempDir::new().unwrap();
    let client = IpcClient::with_socket_path(dir.path().join("missing.sock"));

    assert!(!client.is_daemon_running().await);
    let err = client.send_command(Command::Change).await.unwrap_err();
    assert!(err.to_string().contains("Could not connect to daemon"));
}
