use attraction_bot::server::{run_console, run_http_server};
use attraction_bot::utils::init_logging;
use attraction_bot::AppConfig;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_or_default(Some("config.toml"));

    // keeps the log file writer flushing until main returns
    let _log_guard = init_logging(&config.logging)?;

    tracing::info!("Loaded configuration: {:?}", config.server.name);

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "--http" {
        let port = args
            .get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(config.http.port);

        let bind_addr = args
            .get(3)
            .map(|s| s.as_str())
            .unwrap_or(config.http.bind_addr.as_str());

        run_http_server(bind_addr, port).await?;
    } else {
        tracing::info!("Starting console session on stdio");
        run_console(&config).await?;
    }

    tracing::info!("Bot shutting down");
    Ok(())
}
