//! In-memory host, reporter, and presenter shared by the use case tests.

use crate::inventory::domain::{
    AccountName, BaseImageRef, DirectoryEntry, LanguageBreakdown, Repository, RepositoryName,
};
use crate::ports::outbound::{
    HostError, HostResult, OutputPresenter, ProgressReporter, RepositoryHost,
};
use crate::shared::Result;
use chrono::{DateTime, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

const DEFAULT_REPOSITORY: &str = "app";

pub fn repository(name: &str) -> Repository {
    Repository::new(
        AccountName::new("octocat".to_string()).unwrap(),
        RepositoryName::new(name.to_string()).unwrap(),
        Some("main".to_string()),
    )
}

pub fn reset_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn rate_limited() -> HostError {
    HostError::RateLimited {
        reset_at: reset_time(),
    }
}

/// Host backed by maps keyed on repository name and path.
///
/// Anything not configured fails with `NotFound`.
#[derive(Default)]
pub struct InMemoryHost {
    pages: Vec<Vec<Repository>>,
    listing_error: Option<HostError>,
    languages: HashMap<String, LanguageBreakdown>,
    directories: HashMap<(String, String), Vec<DirectoryEntry>>,
    files: HashMap<(String, String), String>,
    rate_limited_languages: HashSet<String>,
    rate_limited_directories: HashSet<(String, String)>,
    rate_limited_files: HashSet<(String, String)>,
    listed: RefCell<Vec<String>>,
    language_calls: RefCell<Vec<String>>,
    page_calls: RefCell<Vec<u32>>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, repositories: Vec<Repository>) -> Self {
        self.pages.push(repositories);
        self
    }

    pub fn with_rate_limit_on_listing(mut self) -> Self {
        self.listing_error = Some(rate_limited());
        self
    }

    pub fn with_listing_failure(mut self) -> Self {
        self.listing_error = Some(HostError::Status {
            status: 500,
            details: "Internal Server Error".to_string(),
        });
        self
    }

    pub fn with_languages(mut self, repository: &str, languages: &[(&str, u64)]) -> Self {
        let breakdown = languages
            .iter()
            .map(|(name, bytes)| (name.to_string(), *bytes))
            .collect();
        self.languages.insert(repository.to_string(), breakdown);
        self
    }

    pub fn with_directory(self, path: &str, entries: Vec<DirectoryEntry>) -> Self {
        self.with_repository_directory(DEFAULT_REPOSITORY, path, entries)
    }

    pub fn with_repository_directory(
        mut self,
        repository: &str,
        path: &str,
        entries: Vec<DirectoryEntry>,
    ) -> Self {
        self.directories
            .insert((repository.to_string(), path.to_string()), entries);
        self
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.with_repository_file(DEFAULT_REPOSITORY, path, content)
    }

    pub fn with_repository_file(mut self, repository: &str, path: &str, content: &str) -> Self {
        self.files.insert(
            (repository.to_string(), path.to_string()),
            content.to_string(),
        );
        self
    }

    pub fn with_rate_limit_on_languages(mut self, repository: &str) -> Self {
        self.rate_limited_languages.insert(repository.to_string());
        self
    }

    pub fn with_rate_limit_on_directory(mut self, path: &str) -> Self {
        self.rate_limited_directories
            .insert((DEFAULT_REPOSITORY.to_string(), path.to_string()));
        self
    }

    pub fn with_rate_limit_on_file(mut self, path: &str) -> Self {
        self.rate_limited_files
            .insert((DEFAULT_REPOSITORY.to_string(), path.to_string()));
        self
    }

    /// Directory paths listed so far, in call order
    pub fn listed_paths(&self) -> Vec<String> {
        self.listed.borrow().clone()
    }

    /// Repositories whose languages were requested, in call order
    pub fn language_calls(&self) -> Vec<String> {
        self.language_calls.borrow().clone()
    }

    pub fn page_calls(&self) -> Vec<u32> {
        self.page_calls.borrow().clone()
    }
}

impl RepositoryHost for InMemoryHost {
    fn list_repositories(&self, _account: &AccountName, page: u32) -> HostResult<Vec<Repository>> {
        self.page_calls.borrow_mut().push(page);
        if let Some(error) = &self.listing_error {
            return Err(error.clone());
        }
        Ok(self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default())
    }

    fn list_languages(&self, repository: &Repository) -> HostResult<LanguageBreakdown> {
        let name = repository.name().to_string();
        self.language_calls.borrow_mut().push(name.clone());
        if self.rate_limited_languages.contains(&name) {
            return Err(rate_limited());
        }
        self.languages
            .get(&name)
            .cloned()
            .ok_or(HostError::NotFound {
                resource: format!("{}/languages", repository.full_name()),
            })
    }

    fn list_directory(
        &self,
        repository: &Repository,
        path: &str,
        _git_ref: &str,
    ) -> HostResult<Vec<DirectoryEntry>> {
        self.listed.borrow_mut().push(path.to_string());
        let key = (repository.name().to_string(), path.to_string());
        if self.rate_limited_directories.contains(&key) {
            return Err(rate_limited());
        }
        self.directories
            .get(&key)
            .cloned()
            .ok_or(HostError::NotFound {
                resource: format!("{}:{}", repository.full_name(), path),
            })
    }

    fn get_file_content(
        &self,
        repository: &Repository,
        path: &str,
        _git_ref: &str,
    ) -> HostResult<Option<String>> {
        let key = (repository.name().to_string(), path.to_string());
        if self.rate_limited_files.contains(&key) {
            return Err(rate_limited());
        }
        match self.files.get(&key) {
            Some(content) => Ok(Some(content.clone())),
            None => Err(HostError::NotFound {
                resource: format!("{}:{}", repository.full_name(), path),
            }),
        }
    }
}

pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}

/// Reporter that keeps every error and completion message
#[derive(Default)]
pub struct RecordingProgressReporter {
    errors: RefCell<Vec<String>>,
    completions: RefCell<Vec<String>>,
}

impl RecordingProgressReporter {
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    pub fn completions(&self) -> Vec<String> {
        self.completions.borrow().clone()
    }
}

impl ProgressReporter for RecordingProgressReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}

    fn report_error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn report_completion(&self, message: &str) {
        self.completions.borrow_mut().push(message.to_string());
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    lines: RefCell<Vec<String>>,
}

impl RecordingPresenter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

impl OutputPresenter for RecordingPresenter {
    fn present(&self, image: &BaseImageRef) -> Result<()> {
        self.lines.borrow_mut().push(image.as_str().to_string());
        Ok(())
    }
}
