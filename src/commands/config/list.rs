use std::path::PathBuf;

use anyhow::Result;

use super::model::ListCommand;
use crate::config::SecureLinkConfig;

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let path = self.file.as_ref().map(PathBuf::from);
        let config = SecureLinkConfig::from_file(path.as_ref())?;

        let profiles = config.profiles.unwrap_or_default();
        if profiles.is_empty() {
            println!("❌ No profiles found in config file");
            return Ok(());
        }

        for profile in profiles {
            let marker = if config.active_profile.as_deref() == Some(profile.name.as_str()) {
                "*"
            } else {
                " "
            };
            let security = if profile.secure { "secure" } else { "insecure" };
            println!(
                "{marker} {} -> {} ({security}, timeout {}s)",
                profile.name, profile.endpoint, profile.timeout
            );
        }
        Ok(())
    }
}
