use std::net::SocketAddr;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

/// Configuration for the application
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Directory where uploaded client photos are stored
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// Address to bind the HTTP server to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port for the HTTP server
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// This function will:
    /// 1. Load variables from .env file if it exists
    /// 2. Deserialize environment variables into Config struct
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenv().ok();

        // Parse environment variables into Config struct
        let config = envy::from_env::<Config>()?;

        Ok(config)
    }

    /// Get a direct reference to the database URL
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind_addr, self.port).parse()?;
        Ok(addr)
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    // Ensure .env file is loaded
    dotenv().ok();

    // Load the configuration
    let config = Config::load()?;

    Ok(config)
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            database_url: "postgres://localhost/clients".to_string(),
            upload_dir: default_upload_dir(),
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }

    #[test]
    fn test_defaults() {
        let config = base_config();
        assert_eq!(config.upload_dir, "uploads");
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_socket_addr() {
        let mut config = base_config();
        config.bind_addr = "127.0.0.1".to_string();
        config.port = 9000;
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.port(), 9000);
    }
}
