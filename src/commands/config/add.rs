use std::path::PathBuf;

use anyhow::Result;

use super::model::{env_var_reference, validate_endpoint, validate_timeout, AddCommand};
use crate::config::{ProfileConfig, SecureLinkConfig};
use crate::connection::DEFAULT_TIMEOUT_SECS;

impl AddCommand {
    pub fn run(&self) -> Result<()> {
        let name = inquire::Text::new("name").prompt()?;
        let endpoint = inquire::Text::new("endpoint")
            .with_placeholder("https://api.example.com")
            .with_validator(validate_endpoint)
            .prompt()?;

        println!("\n📝 Enter the environment variable holding the API key.");
        println!("   It will be expanded at runtime (e.g., SECURELINK_API_KEY)");
        println!("   You can use ${{VAR}} or $VAR syntax, or just the variable name.\n");
        let api_key_var = inquire::Text::new("API key environment variable")
            .with_placeholder("SECURELINK_API_KEY")
            .prompt()?;

        let timeout = inquire::Text::new("timeout (seconds)")
            .with_default(&DEFAULT_TIMEOUT_SECS.to_string())
            .with_validator(validate_timeout)
            .prompt()?
            .trim()
            .parse::<u64>()?;

        let profile = ProfileConfig {
            name,
            endpoint,
            api_key: env_var_reference(&api_key_var),
            secure: true,
            timeout,
        };

        let path = self.file.as_ref().map(PathBuf::from);
        let mut config = SecureLinkConfig::from_file(path.as_ref())?;

        // Write to the user-specified location even if it did not exist yet
        if let Some(user_path) = path {
            config.path = Some(user_path);
        }

        config.upsert_profile(profile);
        config.write_to_file()?;

        println!("✅ Profile added successfully!");
        Ok(())
    }
}
