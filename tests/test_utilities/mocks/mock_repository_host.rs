use base_image_inventory::prelude::*;
use chrono::{DateTime, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub fn reset_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 9, 30, 0).unwrap()
}

/// Mock RepositoryHost serving an in-memory account.
///
/// Directory listings are derived from the file paths given to
/// `with_repository`, in insertion order. Every call is recorded as
/// `kind:repo:path@ref` so tests can assert on what was (not) requested.
#[derive(Clone, Default)]
pub struct MockRepositoryHost {
    repositories: Vec<String>,
    page_size: usize,
    languages: HashMap<String, LanguageBreakdown>,
    trees: HashMap<(String, String), Vec<DirectoryEntry>>,
    files: HashMap<(String, String), String>,
    failing_files: HashSet<(String, String)>,
    rate_limited: HashSet<String>,
    listing_fails: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockRepositoryHost {
    pub fn new() -> Self {
        Self {
            page_size: 100,
            ..Self::default()
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Adds a repository with its languages and `(path, content)` files
    pub fn with_repository(
        mut self,
        name: &str,
        languages: &[(&str, u64)],
        files: &[(&str, &str)],
    ) -> Self {
        self.repositories.push(name.to_string());
        self.languages.insert(
            name.to_string(),
            languages
                .iter()
                .map(|(language, bytes)| (language.to_string(), *bytes))
                .collect(),
        );
        self.trees
            .entry((name.to_string(), String::new()))
            .or_default();

        for (path, content) in files {
            self.add_file(name, path);
            self.files
                .insert((name.to_string(), path.to_string()), content.to_string());
        }
        self
    }

    /// Adds a repository with no `Dockerfile` language
    pub fn with_plain_repository(self, name: &str) -> Self {
        self.with_repository(name, &[("Rust", 4096)], &[])
    }

    /// Makes the content fetch of one file fail
    pub fn with_failing_file(mut self, repository: &str, path: &str) -> Self {
        self.failing_files
            .insert((repository.to_string(), path.to_string()));
        self
    }

    /// Makes every call concerning `repository` answer with a rate limit
    pub fn with_rate_limit_on(mut self, repository: &str) -> Self {
        self.rate_limited.insert(repository.to_string());
        self
    }

    pub fn without_rate_limits(mut self) -> Self {
        self.rate_limited.clear();
        self
    }

    pub fn with_listing_failure(mut self) -> Self {
        self.listing_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// True if any call touched `repository`
    pub fn touched(&self, repository: &str) -> bool {
        let marker = format!(":{}:", repository);
        self.calls().iter().any(|c| c.contains(&marker))
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn add_file(&mut self, repository: &str, path: &str) {
        let segments: Vec<&str> = path.split('/').collect();
        let mut parent = String::new();
        for (i, segment) in segments.iter().enumerate() {
            let entry = if i + 1 == segments.len() {
                DirectoryEntry::file(*segment)
            } else {
                DirectoryEntry::dir(*segment)
            };
            let listing = self
                .trees
                .entry((repository.to_string(), parent.clone()))
                .or_default();
            if !listing.contains(&entry) {
                listing.push(entry);
            }
            parent = if parent.is_empty() {
                segment.to_string()
            } else {
                format!("{}/{}", parent, segment)
            };
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_rate_limit(&self, repository: &Repository) -> HostResult<()> {
        if self.rate_limited.contains(repository.name()) {
            return Err(HostError::RateLimited {
                reset_at: reset_time(),
            });
        }
        Ok(())
    }
}

impl RepositoryHost for MockRepositoryHost {
    fn list_repositories(&self, account: &AccountName, page: u32) -> HostResult<Vec<Repository>> {
        self.record(format!("page:{}", page));
        if self.listing_fails {
            return Err(HostError::Status {
                status: 502,
                details: "Bad Gateway".to_string(),
            });
        }

        let start = (page as usize - 1) * self.page_size;
        Ok(self
            .repositories
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|name| {
                Repository::new(
                    account.clone(),
                    RepositoryName::new(name.clone()).unwrap(),
                    Some("main".to_string()),
                )
            })
            .collect())
    }

    fn list_languages(&self, repository: &Repository) -> HostResult<LanguageBreakdown> {
        self.record(format!("languages:{}:", repository.name()));
        self.check_rate_limit(repository)?;
        self.languages
            .get(repository.name())
            .cloned()
            .ok_or(HostError::NotFound {
                resource: repository.full_name(),
            })
    }

    fn list_directory(
        &self,
        repository: &Repository,
        path: &str,
        git_ref: &str,
    ) -> HostResult<Vec<DirectoryEntry>> {
        self.record(format!("list:{}:{}@{}", repository.name(), path, git_ref));
        self.check_rate_limit(repository)?;
        self.trees
            .get(&(repository.name().to_string(), path.to_string()))
            .cloned()
            .ok_or(HostError::NotFound {
                resource: format!("{}/{}", repository.full_name(), path),
            })
    }

    fn get_file_content(
        &self,
        repository: &Repository,
        path: &str,
        git_ref: &str,
    ) -> HostResult<Option<String>> {
        self.record(format!("content:{}:{}@{}", repository.name(), path, git_ref));
        self.check_rate_limit(repository)?;
        let key = (repository.name().to_string(), path.to_string());
        if self.failing_files.contains(&key) {
            return Err(HostError::Transport {
                details: "connection reset".to_string(),
            });
        }
        Ok(self.files.get(&key).cloned())
    }
}
