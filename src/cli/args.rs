use crate::domain::config::ConfigOverrides;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Command line arguments for Schemy
#[derive(Parser, Debug)]
#[command(
    name = "schemy",
    version = env!("CARGO_PKG_VERSION"),
    about = "Create Airtable schemas!",
    long_about = "Download the schema (tables, fields, field types and options) of an Airtable base as formatted JSON."
)]
pub struct Args {
    /// Config file (default is $XDG_CONFIG_HOME/schemy/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,

    /// Airtable API token
    #[arg(long = "airtable-token", global = true)]
    pub airtable_token: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download a schema from Airtable
    Download(DownloadArgs),
}

/// Arguments of `schemy download`
#[derive(ClapArgs, Debug)]
pub struct DownloadArgs {
    /// Airtable base ID, e.g. appXXXXXXXXXXXXXX
    #[arg(value_name = "BASE_ID")]
    pub base_id: String,

    /// File to create with the schema JSON; must not exist yet
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

impl Args {
    /// Flags that override the config file and environment.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            log_level: self.log_level.clone(),
            airtable_token: self.airtable_token.clone(),
        }
    }
}
