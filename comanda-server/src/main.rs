use comanda_server::{Config, Server, ServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (dotenv, logging)
    dotenv::dotenv().ok();
    let config = Config::from_env();
    comanda_server::init_logger_with_file(
        std::env::var("LOG_LEVEL").ok().as_deref(),
        config.log_dir.as_deref(),
    );

    comanda_server::print_banner();
    tracing::info!("Comanda server starting...");

    // 2. Server state (store + registries)
    let state = ServerState::initialize(&config).await?;

    // 3. HTTP server (starts background watchers itself)
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
