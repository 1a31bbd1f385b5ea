use anyhow::Result;
use clap::Parser;
use inquire::validator::Validation;
use url::Url;

#[derive(Parser, Debug)]
pub enum ConfigCommand {
    Add(AddCommand),
    #[clap(alias = "rm")]
    Remove(RemoveCommand),
    #[clap(alias = "ls")]
    List(ListCommand),
    /// Make a profile the default for `run`
    Use(UseCommand),
}

impl ConfigCommand {
    pub fn run(&self) -> Result<()> {
        match self {
            ConfigCommand::Add(cmd) => cmd.run(),
            ConfigCommand::Remove(cmd) => cmd.run(),
            ConfigCommand::List(cmd) => cmd.run(),
            ConfigCommand::Use(cmd) => cmd.run(),
        }
    }
}

#[derive(Parser, Debug)]
pub struct AddCommand {
    #[clap(short, long)]
    pub file: Option<String>,
}

#[derive(Parser, Debug)]
pub struct RemoveCommand {
    pub name: Option<String>,
    #[clap(short, long)]
    pub file: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ListCommand {
    #[clap(short, long)]
    pub file: Option<String>,
}

#[derive(Parser, Debug)]
pub struct UseCommand {
    pub name: String,
    #[clap(short, long)]
    pub file: Option<String>,
}

/// Normalizes a variable name typed as `VAR`, `$VAR` or `${VAR}` to `${VAR}`.
pub fn env_var_reference(var_name: &str) -> String {
    format!(
        "${{{}}}",
        var_name
            .trim()
            .trim_start_matches('$')
            .trim_start_matches('{')
            .trim_end_matches('}')
    )
}

#[allow(clippy::unnecessary_wraps)]
pub fn validate_endpoint(
    endpoint: &str,
) -> Result<Validation, Box<dyn std::error::Error + Send + Sync>> {
    match Url::parse(endpoint) {
        Ok(url) if url.scheme() == "https" => Ok(Validation::Valid),
        Ok(url) => Ok(Validation::Invalid(
            format!(
                "⚠️ Endpoint uses '{}' - only https endpoints are considered secure",
                url.scheme()
            )
            .into(),
        )),
        Err(error) => Ok(Validation::Invalid(error.into())),
    }
}

#[allow(clippy::unnecessary_wraps)]
pub fn validate_timeout(
    timeout: &str,
) -> Result<Validation, Box<dyn std::error::Error + Send + Sync>> {
    match timeout.trim().parse::<u64>() {
        Ok(_) => Ok(Validation::Valid),
        Err(error) => Ok(Validation::Invalid(error.into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("API_KEY")]
    #[case("$API_KEY")]
    #[case("${API_KEY}")]
    #[case("  API_KEY ")]
    fn env_var_reference_normalizes(#[case] input: &str) {
        assert_eq!(env_var_reference(input), "${API_KEY}");
    }

    #[rstest]
    #[case("https://api.example.com", true)]
    #[case("https://api.example.com/v1/", true)]
    #[case("http://api.example.com", false)]
    #[case("api.example.com", false)]
    fn endpoint_validation(#[case] endpoint: &str, #[case] valid: bool) {
        let result = validate_endpoint(endpoint).unwrap();
        assert_eq!(matches!(result, Validation::Valid), valid);
    }

    #[rstest]
    #[case("30", true)]
    #[case(" 5 ", true)]
    #[case("-1", false)]
    #[case("soon", false)]
    fn timeout_validation(#[case] timeout: &str, #[case] valid: bool) {
        let result = validate_timeout(timeout).unwrap();
        assert_eq!(matches!(result, Validation::Valid), valid);
    }
}
