//! Startup configuration.
//!
//! Values come from the command line (or the matching `PATHMAP_*`
//! environment variables), then from an optional YAML file given with
//! `--config`:
//!
//! ```yaml
//! port: 8080
//! routes: site/routes.json
//! bind: 127.0.0.1
//! ```
//!
//! A relative `routes` in the YAML file is taken relative to that file.
//! On the command line it is taken relative to the working directory.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

/// Lowest port the server will bind.
pub const MIN_PORT: u16 = 1024;

pub const DEFAULT_BIND: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no port given")]
    MissingPort,

    #[error("port {0} is out of range (1024-65535)")]
    PortOutOfRange(u16),

    #[error("no routing descriptor given")]
    MissingRoutes,

    #[error("cannot make descriptor path absolute: {0}")]
    Resolve(#[source] io::Error),
}

/// Command line arguments.
#[derive(Debug, Default, Parser)]
#[command(name = "pathmap", version)]
#[command(about = "Serve a fixed map of URL paths to local files", long_about = None)]
pub struct Args {
    /// Port to listen on (1024-65535)
    #[arg(env = "PATHMAP_PORT")]
    pub port: Option<u16>,

    /// Routing descriptor (JSON)
    #[arg(env = "PATHMAP_ROUTES")]
    pub routes: Option<PathBuf>,

    /// Address to bind [default: 127.0.0.1]
    #[arg(short, long, env = "PATHMAP_BIND")]
    pub bind: Option<IpAddr>,

    /// YAML file providing any of port, routes and bind
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    port: Option<u16>,
    routes: Option<PathBuf>,
    bind: Option<IpAddr>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_yaml::from_str(&text)?)
    }
}

/// Validated, immutable server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: IpAddr,
    pub port: u16,
    /// Absolute path of the routing descriptor
    pub routes: PathBuf,
}

impl Config {
    /// Parses the process arguments and builds the configuration.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_args(Args::parse())
    }

    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let (file, file_dir) = match &args.config {
            Some(path) => (
                FileConfig::load(path)?,
                path.parent().map(Path::to_path_buf).unwrap_or_default(),
            ),
            None => (FileConfig::default(), PathBuf::new()),
        };

        let port = args.port.or(file.port).ok_or(ConfigError::MissingPort)?;
        if port < MIN_PORT {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let routes = match (args.routes, file.routes) {
            (Some(routes), _) => routes,
            (None, Some(routes)) => file_dir.join(routes),
            (None, None) => return Err(ConfigError::MissingRoutes),
        };
        let routes = std::path::absolute(routes).map_err(ConfigError::Resolve)?;

        Ok(Self {
            bind: args.bind.or(file.bind).unwrap_or(DEFAULT_BIND),
            port,
            routes,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
