use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every repository processed, or a controlled stop on a rate limit
    Success = 0,
    /// Missing or invalid command-line arguments
    InvalidArguments = 1,
    /// Fatal runtime error (account listing, configuration, output)
    ApplicationError = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (1)"),
            ExitCode::ApplicationError => write!(f, "Application Error (2)"),
        }
    }
}

/// Application-specific errors for the inventory run.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Invalid argument: {message}\n\n💡 Hint: Usage: base-image-inventory <ACCOUNT> <BRANCH_REF> [true|false] [START_INDEX]")]
    InvalidArgument { message: String },

    #[error("Failed to list repositories for account '{account}'\nDetails: {details}\n\n💡 Hint: Check the account name, your network connection, and the GITHUB_TOKEN value")]
    AccountListingFailed { account: String, details: String },

    #[error("Invalid configuration: {path}\nDetails: {details}\n\n💡 Hint: Please fix the configuration file or pass --config with a valid file")]
    ConfigError { path: PathBuf, details: String },

    #[error("Failed to write output\nDetails: {details}")]
    OutputError { details: String },

    /// Validation error for request construction
    #[error("Validation error: {message}")]
    Validation { message: String },
}
