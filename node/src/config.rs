use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub struct NodeConfig {
    pub ledger_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub auth_token: Option<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("../data/economy/ledger"),
            bind_addr: "0.0.0.0:2009".parse().unwrap(),
            auth_token: None,
        }
    }
}

impl NodeConfig {
    /// Environment-driven config. Inside a container the ledger defaults
    /// to the mounted ./data volume.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if Path::new("/.dockerenv").exists() {
            tracing::info!("Running in Docker!");
            cfg.ledger_path = PathBuf::from("./data/ledger");
        }
        if let Ok(path) = std::env::var("MERCURY_LEDGER_PATH") {
            cfg.ledger_path = PathBuf::from(path);
        }
        if let Ok(addr) = std::env::var("MERCURY_BIND_ADDR") {
            match addr.parse() {
                Ok(parsed) => cfg.bind_addr = parsed,
                Err(e) => tracing::warn!("Ignoring invalid MERCURY_BIND_ADDR: {}", e),
            }
        }
        cfg.auth_token = std::env::var("MERCURY_AUTH_TOKEN")
            .ok()
            .filter(|token| !token.is_empty());

        cfg
    }
}
