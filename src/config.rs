//! Command-line configuration.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Ports at or below this are reserved.
const MIN_PORT_EXCLUSIVE: u16 = 1024;

#[derive(Debug, Clone, Parser)]
#[command(name = "cafe-orders")]
#[command(about = "Coffee shop inventory, menu and order backend", long_about = None)]
pub struct Config {
    /// Directory holding inventory.json, menu_items.json and orders.json
    #[arg(long, default_value = "./data")]
    pub dir: PathBuf,

    /// Port to listen on (1025-65535)
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("port {0} is out of range, expected 1025-65535")]
    PortOutOfRange(u16),

    #[error("{0} exists and is not a directory")]
    NotADirectory(PathBuf),
}

impl Config {
    /// Rejects a reserved port and a `--dir` that names an existing non-directory.
    /// A missing directory is fine; it is created at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port <= MIN_PORT_EXCLUSIVE {
            return Err(ConfigError::PortOutOfRange(self.port));
        }
        if self.dir.exists() && !self.dir.is_dir() {
            return Err(ConfigError::NotADirectory(self.dir.clone()));
        }
        Ok(())
    }
}
