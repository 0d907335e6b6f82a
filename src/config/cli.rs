use crate::config::toml_config::SightsConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "keelung-sights")]
#[command(about = "Keep a local catalog of Keelung sights in sync with the live source")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Live source endpoint (overrides source.endpoint)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// JSON store file (overrides store.path)
    #[arg(long)]
    pub store_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Clear the store and re-fetch every configured zone
    Refresh,
    /// List stored sights of a zone (中正 or 中正區)
    Zone { zone: String },
    /// Fetch a zone straight from the live source
    Live { zone: String },
    /// Show one stored sight
    Get { id: String },
    /// Show several stored sights
    Ids {
        #[arg(value_delimiter = ',', required = true)]
        ids: Vec<String>,
    },
    /// Store a sight read from a JSON file
    Create { file: PathBuf },
}

impl Cli {
    /// Loads the config file if given, then applies flag overrides.
    pub fn load_config(&self) -> Result<SightsConfig> {
        let mut config = match &self.config {
            Some(path) => SightsConfig::from_file(path)?,
            None => SightsConfig::default(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.source.endpoint = Some(endpoint.clone());
        }
        if let Some(store_path) = &self.store_path {
            config.store.path = store_path.clone();
        }
        Ok(config)
    }
}
