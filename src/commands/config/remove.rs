use std::path::PathBuf;

use anyhow::Result;
use inquire::Select;

use super::model::RemoveCommand;
use crate::config::SecureLinkConfig;

impl RemoveCommand {
    pub fn run(&self) -> Result<()> {
        let path = self.file.as_ref().map(PathBuf::from);
        let mut config = SecureLinkConfig::from_file(path.as_ref())?;

        let names: Vec<String> = config
            .profiles
            .iter()
            .flatten()
            .map(|profile| profile.name.clone())
            .collect();
        let name = match &self.name {
            Some(name) => name.clone(),
            None if names.is_empty() => {
                println!("❌ No profiles found in config file");
                return Ok(());
            }
            None => Select::new("name", names).prompt()?,
        };

        if !config.remove_profile(&name) {
            anyhow::bail!("Profile '{name}' not found in configuration");
        }
        config.write_to_file()?;

        println!("✅ Profile '{name}' removed successfully!");
        Ok(())
    }
}
