use crate::events::AppEvent;
use async_channel::Sender;
use harmony_wheel::WheelEvent;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

/// Accepts one wheel event per line on a Unix socket, e.g. `echo "color 120,0.5" | nc -U ...`.
pub async fn run_server(socket_path: PathBuf, tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if fs_err::metadata(&socket_path).is_ok() {
        let _ = fs_err::remove_file(&socket_path);
    }

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket {}: {}", socket_path.display(), e);
            return;
        }
    };
    log::info!("Listening on {}", socket_path.display());

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match line.parse::<WheelEvent>() {
                            Ok(event) => {
                                if tx.send(AppEvent::Wheel(event)).await.is_err() {
                                    return;
                                }
                            }
                            Err(e) => log::warn!("Ignoring '{}': {}", line, e),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
