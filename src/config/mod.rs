use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use crate::errors::WikiError;
use crate::routes::is_valid_title;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_TEMPLATES_DIR: &str = "tmpl";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_FRONT_PAGE: &str = "FrontPage";

/// Server configuration, read from the command line
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "wikid")]
#[command(about = "Serves a wiki of plain text pages", long_about = None)]
pub struct Config {
    /// Directory holding one `{title}.txt` file per page
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Directory containing view.html and edit.html
    #[arg(long, default_value = DEFAULT_TEMPLATES_DIR)]
    pub templates_dir: PathBuf,

    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Page the root URL redirects to
    #[arg(long, default_value = DEFAULT_FRONT_PAGE)]
    pub front_page: String,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            front_page: DEFAULT_FRONT_PAGE.to_string(),
        }
    }

    /// Check values that clap cannot check on its own
    pub fn validate(&self) -> Result<(), WikiError> {
        if !is_valid_title(&self.front_page) {
            return Err(WikiError::InvalidTitle(self.front_page.clone()));
        }
        Ok(())
    }

    /// Get the socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, WikiError> {
        let ip: IpAddr = self.host.parse().map_err(|e| {
            WikiError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid host {:?}: {}", self.host, e),
            ))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
