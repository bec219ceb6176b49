use label_server::{Config, Server, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. .env first so it can feed both logging and config
    let _ = dotenvy::dotenv();

    // 2. Load config (fails on unparsable values)
    let config = Config::from_env()?;

    init_logger_with_file(
        Some(&config.log_level),
        config.is_production(),
        config.log_dir.as_deref(),
    );

    print_banner();

    tracing::info!("🏷️ Label server starting...");

    // 3. Validate layout and build printer/preview clients
    let server = match Server::new(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            return Err(e.into());
        }
    };

    // 4. Serve until Ctrl-C
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
