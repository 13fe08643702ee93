use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::context::ServerContext;

/// Binds the configured address and serves until the task is dropped.
pub async fn run(cfg: Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr))?;
    let ctx = Arc::new(ServerContext::new(cfg));

    info!("Server running on http://{}/", listener.local_addr()?);
    info!("Serving files from {}", ctx.resolver.root().display());
    info!("Quit the server with CTRL-C");

    serve(listener, ctx).await
}

/// Accept loop. Every connection is handled in its own task, so a failing
/// client never takes the listener down.
pub async fn serve(listener: TcpListener, ctx: Arc<ServerContext>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!(error = %e, "Failed to accept connection");
                tokio::time::sleep(Duration::from_millis(100)).await;
                continue;
            }
        };
        tracing::debug!(peer = %peer, "Accepted connection");

        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, ctx);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}
