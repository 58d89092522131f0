//! Server configuration.
//!
//! Every setting is a command-line flag with an environment fallback:
//!
//! - `--host` / `HOST`: bind address (default `127.0.0.1`)
//! - `--port` / `PORT`: bind port (default `3000`)
//! - `--dataset` / `DATASET_PATH`: XML dataset read on every request
//!   (default `dataset.xml`)
//! - `--rejected-token` / `REJECTED_ACCESS_TOKEN`: `AccessToken` value
//!   answered with 401 (default `bad`)
//!
//! The config is handed to `app` at construction. Nothing here is global, so
//! tests can run servers over different datasets side by side.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "search-server", about = "Search a people dataset over HTTP", version)]
pub struct ServerConfig {
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Path of the XML dataset.
    #[arg(long, env = "DATASET_PATH", default_value = "dataset.xml")]
    pub dataset: PathBuf,

    /// Token value that is refused with 401.
    #[arg(long, env = "REJECTED_ACCESS_TOKEN", default_value = "bad")]
    pub rejected_token: String,
}

impl ServerConfig {
    /// Defaults for everything except the dataset location.
    pub fn new(dataset: impl Into<PathBuf>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            dataset: dataset.into(),
            rejected_token: "bad".to_string(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
