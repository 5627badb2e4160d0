//! Server Configuration
//!
//! Command-line flags with environment variable fallbacks.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Ecoleta collection point API
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    #[arg(long, env = "ECOLETA_BIND", default_value = "0.0.0.0:3333")]
    pub bind: SocketAddr,

    /// SQLite database file (`:memory:` for a throwaway database)
    #[arg(long, env = "ECOLETA_DATABASE", default_value = "ecoleta.db")]
    pub database: PathBuf,

    /// Directory holding uploaded and catalog images
    #[arg(long, env = "ECOLETA_UPLOADS_DIR", default_value = "uploads")]
    pub uploads_dir: PathBuf,

    /// Base URL clients use to reach this server, used to build image URLs
    #[arg(long, env = "ECOLETA_PUBLIC_URL", default_value = "http://localhost:3333")]
    pub public_url: String,

    /// Directory for rolling log files
    #[arg(long, env = "ECOLETA_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,
}
