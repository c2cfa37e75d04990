/// ProgressReporter port for diagnostics during an inventory run
///
/// Everything reported here goes to the diagnostic stream, never to the
/// stream carrying base image references.
pub trait ProgressReporter {
    /// Reports an informational message
    fn report(&self, message: &str);

    /// Reports that repository `current` of `total` is being scanned
    ///
    /// # Arguments
    /// * `current` - 1-based position in the full repository listing
    /// * `total` - Number of repositories in the listing
    /// * `message` - Optional message (usually the repository name)
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a non-fatal failure or warning
    fn report_error(&self, message: &str);

    /// Reports the end of the run, whether complete or stopped
    fn report_completion(&self, message: &str);
}
