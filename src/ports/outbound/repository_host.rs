use crate::inventory::domain::{AccountName, DirectoryEntry, LanguageBreakdown, Repository};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Failures reported by a repository host.
///
/// `RateLimited` is the controlled-stop signal: callers never retry it and
/// never swallow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("API rate limit exceeded; resets at {reset_at}")]
    RateLimited { reset_at: DateTime<Utc> },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Host returned status code {status}: {details}")]
    Status { status: u16, details: String },

    #[error("Request failed: {details}")]
    Transport { details: String },

    #[error("Unexpected response: {details}")]
    Decode { details: String },
}

impl HostError {
    /// Reset time for the rate-limit variant, `None` for everything else
    pub fn rate_limit_reset(&self) -> Option<DateTime<Utc>> {
        match self {
            HostError::RateLimited { reset_at } => Some(*reset_at),
            _ => None,
        }
    }

    pub fn is_rate_limit(&self) -> bool {
        self.rate_limit_reset().is_some()
    }

    /// Finds a rate-limit failure inside an application-level error chain
    pub fn rate_limit_reset_in(error: &anyhow::Error) -> Option<DateTime<Utc>> {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<HostError>())
            .and_then(HostError::rate_limit_reset)
    }
}

/// Result of a single host call
pub type HostResult<T> = std::result::Result<T, HostError>;

/// RepositoryHost port for reading an account's repositories
///
/// This port abstracts the remote API (e.g., GitHub REST) the inventory
/// reads from. Calls are blocking and made one at a time.
pub trait RepositoryHost {
    /// Lists one page of the account's repositories (pages start at 1).
    ///
    /// An empty page marks the end of the listing.
    fn list_repositories(&self, account: &AccountName, page: u32) -> HostResult<Vec<Repository>>;

    /// Fetches the repository's language breakdown (language name to byte count)
    fn list_languages(&self, repository: &Repository) -> HostResult<LanguageBreakdown>;

    /// Lists the direct entries of `path` (root when empty) as of `git_ref`
    fn list_directory(
        &self,
        repository: &Repository,
        path: &str,
        git_ref: &str,
    ) -> HostResult<Vec<DirectoryEntry>>;

    /// Fetches the decoded text of one file as of `git_ref`.
    ///
    /// `None` means the host returned no content for the path.
    fn get_file_content(
        &self,
        repository: &Repository,
        path: &str,
        git_ref: &str,
    ) -> HostResult<Option<String>>;
}
