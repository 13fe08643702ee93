use lantern::config::Config;
use lantern::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = Config::load().inspect_err(|e| tracing::error!("Err: {:#}", e))?;

    tokio::select! {
        res = server::listener::run(cfg) => {
            if let Err(e) = &res {
                tracing::error!("Err: {:#}", e);
            }
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
