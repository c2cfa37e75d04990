use crate::application::dto::ScanSummary;
use crate::application::use_cases::ListDockerfilesUseCase;
use crate::inventory::domain::Repository;
use crate::inventory::services::{FromLineExtractor, LanguageFilter};
use crate::ports::outbound::{OutputPresenter, ProgressReporter, RepositoryHost};
use crate::shared::Result;
use tracing::debug;

/// ScanRepositoryUseCase - Emits the base images of one repository
///
/// Steps:
/// 1. Fetch the language breakdown and skip repositories without `Dockerfile`
/// 2. Walk the tree for Dockerfile variants
/// 3. Fetch each file and emit its base images immediately, in order
///
/// Per-file failures are reported and skipped. A rate limit from any host
/// call is returned as an error carrying `HostError::RateLimited`.
pub struct ScanRepositoryUseCase<'a, H, P, PR> {
    host: &'a H,
    presenter: &'a P,
    progress_reporter: &'a PR,
    max_depth: usize,
}

impl<'a, H, P, PR> ScanRepositoryUseCase<'a, H, P, PR>
where
    H: RepositoryHost,
    P: OutputPresenter,
    PR: ProgressReporter,
{
    pub fn new(host: &'a H, presenter: &'a P, progress_reporter: &'a PR, max_depth: usize) -> Self {
        Self {
            host,
            presenter,
            progress_reporter,
            max_depth,
        }
    }

    pub fn execute(
        &self,
        repository: &Repository,
        branch_ref: &str,
        recursive: bool,
    ) -> Result<ScanSummary> {
        let languages = match self.host.list_languages(repository) {
            Ok(languages) => languages,
            Err(e) if e.is_rate_limit() => return Err(e.into()),
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Failed to fetch languages for {}: {}",
                    repository.full_name(),
                    e
                ));
                return Ok(ScanSummary::skipped());
            }
        };

        if !LanguageFilter::reports_dockerfile(&languages) {
            debug!(repository = %repository.full_name(), "no Dockerfile language reported, skipping");
            return Ok(ScanSummary::skipped());
        }

        let walker = ListDockerfilesUseCase::new(self.host, self.progress_reporter, self.max_depth);
        let paths = walker.execute(repository, branch_ref, recursive)?;
        debug!(
            repository = %repository.full_name(),
            default_branch = ?repository.default_branch(),
            count = paths.len(),
            "Dockerfiles found"
        );

        let mut summary = ScanSummary::walked(paths.len());
        for path in &paths {
            let Some(content) = self.fetch_content(repository, path, branch_ref)? else {
                continue;
            };
            summary.dockerfiles_read += 1;

            for image in FromLineExtractor::extract_base_images(&content) {
                self.presenter.present(&image)?;
                summary.images_emitted += 1;
            }
        }

        Ok(summary)
    }

    /// Fetches one file, returning `None` when it should be skipped
    fn fetch_content(
        &self,
        repository: &Repository,
        path: &str,
        branch_ref: &str,
    ) -> Result<Option<String>> {
        match self.host.get_file_content(repository, path, branch_ref) {
            Ok(Some(content)) if !content.is_empty() => Ok(Some(content)),
            Ok(_) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Content is empty for file {} in repo {}",
                    path,
                    repository.full_name()
                ));
                Ok(None)
            }
            Err(e) if e.is_rate_limit() => Err(e.into()),
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Failed to fetch {} in repo {}: {}",
                    path,
                    repository.full_name(),
                    e
                ));
                Ok(None)
            }
        }
    }
}
