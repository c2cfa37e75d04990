use crate::inventory::domain::{EntryKind, Repository};
use crate::inventory::services::DockerfileClassifier;
use crate::ports::outbound::{HostResult, ProgressReporter, RepositoryHost};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Deepest directory level walked below the repository root
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// ListDockerfilesUseCase - Finds Dockerfile variants in a repository tree
///
/// Directories are walked breadth-first from the root with an explicit queue.
/// Each directory is listed at most once, and directories deeper than
/// `max_depth` are reported and left unlisted. The result holds the matching
/// files of each listed directory in listing order, with directories taken in
/// the order they were discovered, so root files always come first.
///
/// A listing failure only drops the affected directory. A rate limit ends
/// the walk and is returned to the caller.
pub struct ListDockerfilesUseCase<'a, H, PR> {
    host: &'a H,
    progress_reporter: &'a PR,
    max_depth: usize,
}

impl<'a, H, PR> ListDockerfilesUseCase<'a, H, PR>
where
    H: RepositoryHost,
    PR: ProgressReporter,
{
    pub fn new(host: &'a H, progress_reporter: &'a PR, max_depth: usize) -> Self {
        Self {
            host,
            progress_reporter,
            max_depth,
        }
    }

    /// Lists Dockerfile paths relative to the repository root
    ///
    /// # Arguments
    /// * `repository` - Repository to walk
    /// * `branch_ref` - Branch, tag, or commit the tree is read at
    /// * `recursive` - Whether subdirectories are walked at all
    ///
    /// # Errors
    /// Only `HostError::RateLimited` is returned; other failures are reported
    /// and the affected directory contributes nothing.
    pub fn execute(
        &self,
        repository: &Repository,
        branch_ref: &str,
        recursive: bool,
    ) -> HostResult<Vec<String>> {
        let mut dockerfiles = Vec::new();
        let mut queue: VecDeque<(String, usize)> = VecDeque::from([(String::new(), 0)]);
        let mut visited: HashSet<String> = HashSet::new();

        while let Some((path, depth)) = queue.pop_front() {
            if !visited.insert(path.clone()) {
                debug!(repository = %repository.full_name(), path = %path, "directory already listed");
                continue;
            }

            let entries = match self.host.list_directory(repository, &path, branch_ref) {
                Ok(entries) => entries,
                Err(e) if e.is_rate_limit() => return Err(e),
                Err(e) => {
                    self.progress_reporter.report_error(&format!(
                        "⚠️  Warning: Failed to list {}:{} at {}: {}",
                        repository.full_name(),
                        display_path(&path),
                        branch_ref,
                        e
                    ));
                    continue;
                }
            };

            for entry in entries {
                if !entry.has_safe_name() {
                    debug!(name = %entry.name(), "skipping entry with unusable name");
                    continue;
                }

                let entry_path = join_path(&path, entry.name());
                match entry.kind() {
                    EntryKind::File if DockerfileClassifier::is_dockerfile_name(entry.name()) => {
                        dockerfiles.push(entry_path);
                    }
                    EntryKind::Dir if recursive => {
                        if depth + 1 > self.max_depth {
                            self.progress_reporter.report_error(&format!(
                                "⚠️  Warning: Not descending into {}:{} (deeper than {} levels)",
                                repository.full_name(),
                                entry_path,
                                self.max_depth
                            ));
                            continue;
                        }
                        queue.push_back((entry_path, depth + 1));
                    }
                    _ => {}
                }
            }
        }

        Ok(dockerfiles)
    }
}

/// Joins a parent path and an entry name with '/', with no leading slash at the root
fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}
