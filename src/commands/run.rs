use std::fs::File;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{debug, info, LevelFilter};
use simplelog::{Config, WriteLogger};

use crate::config::SecureLinkConfig;
use crate::connection::ConnectionOperations;
use crate::session::{run_session, DEFAULT_ITEMS};

#[derive(Parser, Debug, Default)]
pub struct RunCommand {
    #[clap(short, long)]
    pub file: Option<String>,
    /// Profile to connect with (defaults to the active profile)
    #[clap(short, long)]
    pub profile: Option<String>,
    /// Turn off the security flag for this run
    #[clap(long)]
    pub insecure: bool,
    /// Override the profile timeout, in seconds
    #[clap(short, long)]
    pub timeout: Option<u64>,
    /// Data items to send
    pub items: Vec<String>,
}

impl RunCommand {
    pub fn run(&self) -> Result<()> {
        if let Ok(log_level) = std::env::var("SECURELINK_LOG") {
            setup_logging(&log_level)?;
        }

        let path = self.file.as_ref().map(PathBuf::from);
        let config = SecureLinkConfig::from_file(path.as_ref())?;
        let profile = config.resolve_profile(self.profile.as_deref())?;
        info!("Using profile: {profile:?}");

        let mut conn = profile.to_connection()?;
        if self.insecure {
            conn = conn.with_security(false);
        }
        if let Some(timeout) = self.timeout {
            conn = conn.with_timeout(timeout);
        }
        debug!(
            "Connection settings: endpoint={}, secure={}, timeout={:?}",
            conn.endpoint(),
            conn.is_secure(),
            conn.timeout()
        );

        if self.items.is_empty() {
            run_session(&conn, &DEFAULT_ITEMS)
        } else {
            run_session(&conn, &self.items)
        }
    }
}

fn parse_level(log_level: &str) -> LevelFilter {
    match log_level.to_lowercase().as_str() {
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

fn setup_logging(log_level: &str) -> Result<()> {
    let log_dir = crate::get_state_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join(format!(
        "securelink-debug-{}.log",
        chrono::Local::now().format("%Y%m%d%H%M%S")
    ));

    WriteLogger::init(
        parse_level(log_level),
        Config::default(),
        File::create(&log_file_path)?,
    )?;

    info!("Logging to: {}", log_file_path.display());
    Ok(())
}
