use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::client::settings::DEFAULT_SETTINGS_FILE;
use crate::client::DEFAULT_CLIENT_URL;

/// dapi: JSON API gateway for the dauth authorization service
#[derive(Debug, Parser)]
#[command(name = "dapi", version, about)]
pub struct Cli {
    /// Settings file holding the CLI login token
    #[arg(long, global = true, env = "DAPI_SETTINGS", default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the gateway server
    Serve {
        /// Port to bind (defaults to DAPI_PORT, then 3611)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Send commands to the dauth service
    Dauth {
        #[command(subcommand)]
        command: DauthCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum DauthCommands {
    /// Authenticate and obtain an API token
    Login {
        user: String,
        /// Password for the login
        #[arg(short, long, default_value = "")]
        password: String,
        /// Gateway URL for client connections
        #[arg(short, long, default_value = DEFAULT_CLIENT_URL)]
        url: String,
    },
    /// Destroy the stored API token
    Logout {
        /// Gateway URL for client connections
        #[arg(short, long, default_value = DEFAULT_CLIENT_URL)]
        url: String,
    },
}
