use clap::Parser;
use std::path::PathBuf;

/// Parses the optional recursion argument, which must be literal `true` or `false`
fn parse_recursive(value: &str) -> Result<bool, String> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!(
            "Enter true or false as values for recursion (got '{}')",
            value
        )),
    }
}

fn parse_branch_ref(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("Branch reference must not be empty".to_string());
    }
    Ok(value.to_string())
}

/// Inventory the Docker base images used across a GitHub account's repositories
#[derive(Parser, Debug)]
#[command(name = "base-image-inventory")]
#[command(version)]
#[command(
    about = "Inventory the Docker base images used across a GitHub account's repositories",
    long_about = "Lists every repository of a GitHub user or organization, finds Dockerfile \
                  variants at the given branch, and prints the base image of each FROM \
                  instruction to stdout, one per line. Diagnostics go to stderr.\n\n\
                  When the API rate limit is reached the run stops cleanly and prints the \
                  START_INDEX to resume from."
)]
pub struct Args {
    /// GitHub user or organization login
    #[arg(value_name = "ACCOUNT")]
    pub account: String,

    /// Branch, tag, or commit to read repository trees at
    #[arg(value_name = "BRANCH_REF", value_parser = parse_branch_ref)]
    pub branch_ref: String,

    /// Walk subdirectories: true or false (default: false)
    #[arg(value_name = "RECURSIVE", value_parser = parse_recursive)]
    pub recursive: Option<bool>,

    /// Position in the repository listing to start from (default: 0)
    #[arg(value_name = "START_INDEX")]
    pub start_index: Option<usize>,

    /// GitHub access token; anonymous requests are made when unset or empty
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Path to a config file (defaults to ./base-image-inventory.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip repositories matching patterns (supports wildcards: *)
    /// Can be specified multiple times: -e "archive-*" -e "sandbox"
    #[arg(short, long = "exclude", value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Diagnostic log level: error, warn, info, debug, or trace
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    pub fn recursive(&self) -> bool {
        self.recursive.unwrap_or(false)
    }

    pub fn start_index(&self) -> usize {
        self.start_index.unwrap_or(0)
    }
}
