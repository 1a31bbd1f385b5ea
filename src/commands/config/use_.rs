use std::path::PathBuf;

use anyhow::Result;

use super::model::UseCommand;
use crate::config::SecureLinkConfig;

impl UseCommand {
    pub fn run(&self) -> Result<()> {
        let path = self.file.as_ref().map(PathBuf::from);
        let mut config = SecureLinkConfig::from_file(path.as_ref())?;

        if config.find_profile(&self.name).is_none() {
            anyhow::bail!("Profile '{}' not found in configuration", self.name);
        }
        config.active_profile = Some(self.name.clone());
        config.write_to_file()?;

        println!("✅ Now using profile '{}'", self.name);
        Ok(())
    }
}
