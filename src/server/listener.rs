use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::http::connection::Connection;
use crate::http::handler::Handler;

/// Binds the configured address and serves connections until the task is
/// dropped.
pub async fn run<H: Handler>(cfg: &Config, handler: Arc<H>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(cfg.socket_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);

    serve(listener, handler).await
}

/// Accept loop over an already bound listener.
///
/// Each connection runs in its own task. Tasks share only the handler, so a
/// slow or broken client never holds up another one.
pub async fn serve<H: Handler>(listener: TcpListener, handler: Arc<H>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, handler);
            if let Err(e) = conn.run().await {
                warn!("Connection from {} aborted: {}", peer, e);
            }
        });
    }
}
