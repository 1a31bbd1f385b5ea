use std::path::PathBuf;
use std::sync::LazyLock;

use clap::Parser;

mod commands;
mod config;
mod connection;
mod session;

use anyhow::Result;
use commands::config::model::ConfigCommand;
use commands::run::RunCommand;
use dirs::{config_dir, home_dir, state_dir};

/// Configuration file path, following the XDG Base Directory specification
/// (~/.config/securelink/config.toml).
static CONFIG_FILE: LazyLock<PathBuf> = LazyLock::new(|| {
    config_dir()
        .or_else(|| home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("securelink")
        .join("config.toml")
});

/// State directory used for log files.
pub fn get_state_dir() -> PathBuf {
    state_dir()
        .or_else(|| home_dir().map(|home| home.join(".local").join("state")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("securelink")
}

#[derive(Parser)]
#[clap(name = "securelink", bin_name = "securelink", version, about)]
struct SecureLinkApp {
    #[clap(subcommand)]
    command: Option<SecureLinkCommand>,
}

#[derive(Parser)]
enum SecureLinkCommand {
    /// Connect, send the data items and disconnect
    Run(RunCommand),
    #[clap(subcommand)]
    Config(ConfigCommand),
}

impl SecureLinkApp {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Some(SecureLinkCommand::Run(cmd)) => cmd.run(),
            Some(SecureLinkCommand::Config(cmd)) => cmd.run(),
            None => RunCommand::default().run(),
        }
    }
}

fn main() -> Result<()> {
    let app = SecureLinkApp::parse();
    app.run()
}
