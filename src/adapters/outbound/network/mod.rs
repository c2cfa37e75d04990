/// Network adapters for external API calls
mod github_client;

pub use github_client::{GitHubClient, GitHubClientSettings, DEFAULT_API_URL, MAX_PER_PAGE};
