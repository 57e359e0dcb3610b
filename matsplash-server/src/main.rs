use anyhow::Context;
use matsplash_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env and logging
    setup_environment();

    print_banner();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "MatSplash server starting...");

    // 2. Configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    if config.jwt.ephemeral {
        tracing::warn!("Using a generated JWT secret; tokens will not survive a restart");
    }

    // 3. Database, admin bootstrap, JWT
    let state = ServerState::initialize(&config)
        .await
        .context("Failed to initialize server state")?;

    // 4. Serve until ctrl-c
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
