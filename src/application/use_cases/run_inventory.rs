use crate::application::dto::{InventoryOutcome, InventoryReport, InventoryRequest};
use crate::application::use_cases::{ScanRepositoryUseCase, DEFAULT_MAX_DEPTH};
use crate::inventory::domain::{AccountName, Repository, ScanCursor};
use crate::inventory::services::RepositoryFilter;
use crate::ports::outbound::{
    HostError, HostResult, OutputPresenter, ProgressReporter, RepositoryHost,
};
use crate::shared::error::InventoryError;
use crate::shared::Result;
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info};

/// Upper bound on listing pages fetched for one account
pub const MAX_REPOSITORY_PAGES: u32 = 1000;

/// RunInventoryUseCase - Drives the inventory across every repository of an account
///
/// The full listing is fetched first, then repositories are scanned one at a
/// time from the request's start index. Base images are emitted through the
/// presenter as they are found.
///
/// A rate limit is a controlled stop: the report carries the cursor of the
/// repository that was interrupted, so passing it back as the start index
/// resumes the run without skipping anything.
///
/// # Type Parameters
/// * `H` - RepositoryHost implementation
/// * `P` - OutputPresenter implementation
/// * `PR` - ProgressReporter implementation
pub struct RunInventoryUseCase<H, P, PR> {
    host: H,
    presenter: P,
    progress_reporter: PR,
    max_depth: usize,
}

impl<H, P, PR> RunInventoryUseCase<H, P, PR>
where
    H: RepositoryHost,
    P: OutputPresenter,
    PR: ProgressReporter,
{
    pub fn new(host: H, presenter: P, progress_reporter: PR) -> Self {
        Self {
            host,
            presenter,
            progress_reporter,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Overrides how deep recursive walks descend
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Executes the inventory run
    ///
    /// # Returns
    /// A report whose outcome is `Completed` or `RateLimited`
    ///
    /// # Errors
    /// Returns an error when the exclude patterns are invalid, the account
    /// listing fails for a reason other than a rate limit, or output fails.
    pub fn execute(&self, request: InventoryRequest) -> Result<InventoryReport> {
        let filter = RepositoryFilter::new(request.exclude_patterns.clone())?;
        let start = ScanCursor::new(request.start_index);

        self.progress_reporter.report(&format!(
            "🔍 Listing repositories for {}...",
            request.account
        ));

        let repositories = match self.list_all_repositories(&request.account) {
            Ok(repositories) => repositories,
            Err(e) => {
                if let Some(reset_at) = e.rate_limit_reset() {
                    self.report_rate_limit(reset_at, start, None);
                    return Ok(InventoryReport::new(
                        InventoryOutcome::RateLimited {
                            repository: None,
                            reset_at,
                        },
                        start,
                    ));
                }
                return Err(InventoryError::AccountListingFailed {
                    account: request.account.to_string(),
                    details: e.to_string(),
                }
                .into());
            }
        };

        let total = repositories.len();
        self.progress_reporter
            .report(&format!("✅ Found {} repository(ies)", total));

        if start.is_exhausted(total) && start.position() > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Start index {} is beyond the {} repository(ies) listed; nothing to scan.",
                start, total
            ));
        } else if start.position() > 0 {
            self.progress_reporter
                .report(&format!("⏩ Resuming from iteration {}", start));
        }

        let scanner = ScanRepositoryUseCase::new(
            &self.host,
            &self.presenter,
            &self.progress_reporter,
            self.max_depth,
        );

        let mut report = InventoryReport::new(InventoryOutcome::Completed, start);
        report.repositories_total = total;

        while !report.cursor.is_exhausted(total) {
            let index = report.cursor.position();
            let repository = &repositories[index];
            self.progress_reporter
                .report_progress(index + 1, total, Some(repository.name()));

            if filter.matches(repository.name()) {
                debug!(repository = %repository.full_name(), "excluded by pattern");
                report.repositories_excluded += 1;
                report.cursor.advance();
                continue;
            }

            let summary =
                match scanner.execute(repository, &request.branch_ref, request.recursive) {
                    Ok(summary) => summary,
                    Err(e) => match HostError::rate_limit_reset_in(&e) {
                        Some(reset_at) => {
                            self.report_rate_limit(reset_at, report.cursor, Some(repository));
                            report.outcome = InventoryOutcome::RateLimited {
                                repository: Some(repository.name().to_string()),
                                reset_at,
                            };
                            return Ok(report);
                        }
                        None => return Err(e),
                    },
                };

            report.repositories_scanned += 1;
            report.dockerfiles_read += summary.dockerfiles_read;
            report.images_found += summary.images_emitted;
            report.cursor.advance();
        }

        for pattern in filter.unmatched_patterns() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Exclude pattern '{}' did not match any repository.",
                pattern
            ));
        }

        info!(
            scanned = report.repositories_scanned,
            excluded = report.repositories_excluded,
            images = report.images_found,
            "inventory complete"
        );
        self.progress_reporter.report_completion(&format!(
            "✅ Complete: {} repository(ies) scanned, {} excluded, {} base image reference(s) found",
            report.repositories_scanned, report.repositories_excluded, report.images_found
        ));

        Ok(report)
    }

    /// Fetches listing pages from 1 until an empty page
    fn list_all_repositories(&self, account: &AccountName) -> HostResult<Vec<Repository>> {
        let mut repositories = Vec::new();

        for page in 1..=MAX_REPOSITORY_PAGES {
            let batch = self.host.list_repositories(account, page)?;
            debug!(page, count = batch.len(), "fetched repository page");
            if batch.is_empty() {
                return Ok(repositories);
            }
            repositories.extend(batch);
        }

        self.progress_reporter.report_error(&format!(
            "⚠️  Warning: Stopped listing after {} pages; remaining repositories are not scanned.",
            MAX_REPOSITORY_PAGES
        ));
        Ok(repositories)
    }

    fn report_rate_limit(
        &self,
        reset_at: DateTime<Utc>,
        cursor: ScanCursor,
        repository: Option<&Repository>,
    ) {
        self.progress_reporter.report_error(&format!(
            "⛔ Rate limit exceeded at {}. Try again in {}",
            reset_at.to_rfc3339(),
            format_wait(reset_at - Utc::now())
        ));
        let message = match repository {
            Some(repository) => format!(
                "When rate limit resets, restart from iteration {}. Repo to be scanned: {}",
                cursor,
                repository.name()
            ),
            None => format!(
                "When rate limit resets, restart from iteration {}. Repository listing was interrupted",
                cursor
            ),
        };
        self.progress_reporter.report_completion(&message);
    }
}

/// Formats a wait as `1h2m3s`, clamping negative waits to `0s`
fn format_wait(wait: TimeDelta) -> String {
    let total = wait.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
