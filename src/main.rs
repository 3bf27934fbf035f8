use std::sync::Arc;

use pathmap::config::Config;
use pathmap::http::handler::FileHandler;
use pathmap::routes::Resolver;
use pathmap::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;

    let handler = Arc::new(FileHandler::new(Resolver::new(cfg.routes.clone())));

    let descriptor = handler.resolver().descriptor_path();
    if descriptor.is_file() {
        tracing::info!("Serving routes from {}", descriptor.display());
    } else {
        tracing::warn!(
            "Routing descriptor {} is missing or not a regular file, every request will get 404",
            descriptor.display()
        );
    }

    tokio::select! {
        res = server::run(&cfg, handler) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
