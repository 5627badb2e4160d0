//! Ecoleta server entry point

use anyhow::Result;
use clap::Parser;

use ecoleta_server::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();

    rolling_logger::init_logger(&config.log_dir, "ecoleta").map_err(anyhow::Error::msg)?;

    if let Err(e) = ecoleta_server::run(config).await {
        rolling_logger::error(&format!("Server stopped: {:#}", e));
        return Err(e);
    }
    Ok(())
}
