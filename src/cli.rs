//! Command-line interface definitions.
//!
//! Every option can also be supplied through an environment variable, which
//! is how the port is usually set when running behind a process manager.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the blog gallery.
///
/// # Examples
///
/// ```sh
/// # Serve the gallery on port 5000 from the current directory
/// blog_gallery
///
/// # Serve on another port with CSV files in ./data
/// PORT=8080 blog_gallery --data-dir ./data
///
/// # Refresh all authors once and exit
/// blog_gallery --data-dir ./data refresh
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding the per-author CSV files
    #[arg(short, long, env = "GALLERY_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Address to listen on
    #[arg(long, env = "GALLERY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Listing pages to walk per author on refresh (0 = until the site runs out)
    #[arg(long, default_value_t = 1)]
    pub max_pages: u32,

    /// Pause between article fetches, in milliseconds
    #[arg(long, default_value_t = 300)]
    pub delay_ms: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve the gallery over HTTP (default)
    Serve,
    /// Refresh every author once, print the report as JSON and exit
    Refresh,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
