/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (remote API, console, stdout).
pub mod output_presenter;
pub mod progress_reporter;
pub mod repository_host;

pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use repository_host::{HostError, HostResult, RepositoryHost};
