use crate::inventory::domain::{
    AccountName, DirectoryEntry, EntryKind, LanguageBreakdown, Repository, RepositoryName,
};
use crate::ports::outbound::{HostError, HostResult, RepositoryHost};
use crate::shared::Result;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Public GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page size the listing endpoint accepts
pub const MAX_PER_PAGE: u32 = 100;

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";
const API_VERSION_HEADER: &str = "x-github-api-version";
const API_VERSION: &str = "2022-11-28";

/// Wait assumed for a 429 that names no reset time
const SECONDARY_LIMIT_WAIT_SECS: i64 = 60;

/// Linear backoff step between retries of transient failures
const RETRY_BACKOFF_MS: u64 = 500;

#[derive(Debug, Deserialize)]
struct GitHubRepository {
    name: String,
    owner: GitHubOwner,
    #[serde(default)]
    default_branch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitHubOwner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GitHubContentEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// The contents endpoint answers with an array for directories and an object for files
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GitHubContents {
    Directory(Vec<GitHubContentEntry>),
    File(GitHubContentEntry),
}

/// Connection settings for [`GitHubClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubClientSettings {
    pub api_url: String,
    /// Bearer token; `None` makes anonymous requests
    pub token: Option<String>,
    pub per_page: u32,
    pub timeout_secs: u64,
    /// Attempts per request for transport failures and 5xx responses
    pub max_retries: u32,
}

impl Default for GitHubClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            per_page: MAX_PER_PAGE,
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

/// GitHubClient adapter for the GitHub REST API
///
/// Implements the RepositoryHost port with a blocking reqwest client. Calls
/// are made one at a time, in the order the use cases issue them.
///
/// Rate-limit responses are never retried; they surface as
/// `HostError::RateLimited` with the reset time the API announced.
pub struct GitHubClient {
    client: Client,
    api_url: String,
    per_page: u32,
    max_retries: u32,
}

impl GitHubClient {
    pub fn new(settings: GitHubClientSettings) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("base-image-inventory/{}", version);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_MEDIA_TYPE));
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(API_VERSION));
        if let Some(token) = settings.token.as_deref().filter(|t| !t.trim().is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.trim()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        } else {
            debug!("no token configured, using anonymous requests");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            per_page: settings.per_page.clamp(1, MAX_PER_PAGE),
            max_retries: settings.max_retries.max(1),
        })
    }

    fn repositories_url(&self, account: &AccountName, page: u32) -> String {
        format!(
            "{}/users/{}/repos?type=all&per_page={}&page={}",
            self.api_url,
            urlencoding::encode(account.as_str()),
            self.per_page,
            page
        )
    }

    fn languages_url(&self, repository: &Repository) -> String {
        format!(
            "{}/repos/{}/{}/languages",
            self.api_url,
            urlencoding::encode(repository.owner().as_str()),
            urlencoding::encode(repository.name())
        )
    }

    fn contents_url(&self, repository: &Repository, path: &str, git_ref: &str) -> String {
        let mut url = format!(
            "{}/repos/{}/{}/contents",
            self.api_url,
            urlencoding::encode(repository.owner().as_str()),
            urlencoding::encode(repository.name())
        );
        if !path.is_empty() {
            url.push('/');
            url.push_str(&encode_path(path));
        }
        url.push_str("?ref=");
        url.push_str(&urlencoding::encode(git_ref));
        url
    }

    /// Sends a GET, retrying transport failures and 5xx responses with linear backoff
    fn get_with_retry(&self, url: &str, accept: Option<&'static str>) -> HostResult<Response> {
        let mut attempt = 1;
        loop {
            match self.send_once(url, accept) {
                Ok(response) => return Ok(response),
                Err(e) if is_transient(&e) && attempt < self.max_retries => {
                    warn!(url, attempt, error = %e, "request failed, retrying");
                    thread::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64));
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn send_once(&self, url: &str, accept: Option<&'static str>) -> HostResult<Response> {
        debug!(url, "GET");
        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(ACCEPT, accept);
        }

        let response = request.send().map_err(|e| HostError::Transport {
            details: e.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if let Some(reset_at) = rate_limit_reset(status, response.headers(), Utc::now()) {
            warn!(url, %reset_at, "rate limit reached");
            return Err(HostError::RateLimited { reset_at });
        }

        if status == StatusCode::NOT_FOUND {
            return Err(HostError::NotFound {
                resource: url.to_string(),
            });
        }

        Err(HostError::Status {
            status: status.as_u16(),
            details: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> HostResult<T> {
        let response = self.get_with_retry(url, None)?;
        response.json::<T>().map_err(|e| HostError::Decode {
            details: e.to_string(),
        })
    }
}

impl RepositoryHost for GitHubClient {
    fn list_repositories(&self, account: &AccountName, page: u32) -> HostResult<Vec<Repository>> {
        let listed: Vec<GitHubRepository> = self.get_json(&self.repositories_url(account, page))?;
        Ok(listed.into_iter().filter_map(into_repository).collect())
    }

    fn list_languages(&self, repository: &Repository) -> HostResult<LanguageBreakdown> {
        self.get_json(&self.languages_url(repository))
    }

    fn list_directory(
        &self,
        repository: &Repository,
        path: &str,
        git_ref: &str,
    ) -> HostResult<Vec<DirectoryEntry>> {
        match self.get_json(&self.contents_url(repository, path, git_ref))? {
            GitHubContents::Directory(entries) => Ok(entries
                .into_iter()
                .map(|entry| DirectoryEntry::new(entry.name, EntryKind::from_api_type(&entry.kind)))
                .collect()),
            GitHubContents::File(entry) => Err(HostError::Decode {
                details: format!("'{}' is a {}, not a directory", path, entry.kind),
            }),
        }
    }

    fn get_file_content(
        &self,
        repository: &Repository,
        path: &str,
        git_ref: &str,
    ) -> HostResult<Option<String>> {
        let url = self.contents_url(repository, path, git_ref);
        let body = self
            .get_with_retry(&url, Some(RAW_MEDIA_TYPE))?
            .text()
            .map_err(|e| HostError::Decode {
                details: e.to_string(),
            })?;

        Ok(Some(body).filter(|b| !b.is_empty()))
    }
}

/// Keeps listed names as-is so resume indices follow the host's listing.
/// Only entries that cannot form a URL path segment are dropped.
fn into_repository(listed: GitHubRepository) -> Option<Repository> {
    let owner = AccountName::from_listing(listed.owner.login);
    let name = RepositoryName::from_listing(listed.name);
    match (owner, name) {
        (Ok(owner), Ok(name)) => Some(Repository::new(owner, name, listed.default_branch)),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "skipping repository with unusable name");
            None
        }
    }
}

fn is_transient(error: &HostError) -> bool {
    match error {
        HostError::Transport { .. } => true,
        HostError::Status { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Percent-encodes each segment of a repository path, keeping '/' separators
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Reset time announced by a rate-limit response, `None` if the response is not one
///
/// - 403/429 with `x-ratelimit-remaining: 0` resets at `x-ratelimit-reset`
/// - `retry-after` means that many seconds from `now`
/// - any other 429 waits a minute
fn rate_limit_reset(
    status: StatusCode,
    headers: &HeaderMap,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if status != StatusCode::FORBIDDEN && status != StatusCode::TOO_MANY_REQUESTS {
        return None;
    }

    let header = |name: &str| -> Option<i64> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    };

    if header("x-ratelimit-remaining") == Some(0) {
        if let Some(reset) = header("x-ratelimit-reset").and_then(|s| DateTime::from_timestamp(s, 0)) {
            return Some(reset);
        }
    }

    if let Some(seconds) = header("retry-after") {
        // Out-of-range waits saturate at the latest representable instant
        let reset = TimeDelta::try_seconds(seconds.max(0))
            .and_then(|wait| now.checked_add_signed(wait))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        return Some(reset);
    }

    if status == StatusCode::TOO_MANY_REQUESTS || header("x-ratelimit-remaining") == Some(0) {
        return Some(now + TimeDelta::seconds(SECONDARY_LIMIT_WAIT_SECS));
    }

    None
}
