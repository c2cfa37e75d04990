//! base-image-inventory - Docker base image inventory for GitHub accounts
//!
//! This library walks every repository of a GitHub user or organization,
//! finds Dockerfile variants, and extracts the base image named by each
//! `FROM` instruction, following hexagonal architecture and Domain-Driven
//! Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inventory`): Value objects and pure parsing/matching logic
//! - **Application Layer** (`application`): Use cases and request/report DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use base_image_inventory::prelude::*;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let host = GitHubClient::new(GitHubClientSettings::default())?;
//! let presenter = StdoutPresenter::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = RunInventoryUseCase::new(host, presenter, progress_reporter);
//!
//! // Execute
//! let request = InventoryRequest::builder()
//!     .account("octocat")
//!     .branch_ref("main")
//!     .recursive(true)
//!     .build()?;
//! let report = use_case.execute(request)?;
//!
//! if report.is_rate_limited() {
//!     eprintln!("resume with start index {}", report.cursor);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod inventory;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{StderrProgressReporter, StdoutPresenter};
    pub use crate::adapters::outbound::network::{GitHubClient, GitHubClientSettings};
    pub use crate::application::dto::{
        InventoryOutcome, InventoryReport, InventoryRequest, ScanSummary,
    };
    pub use crate::application::use_cases::{
        ListDockerfilesUseCase, RunInventoryUseCase, ScanRepositoryUseCase,
    };
    pub use crate::inventory::domain::{
        AccountName, BaseImageRef, DirectoryEntry, EntryKind, LanguageBreakdown, Repository,
        RepositoryName, ScanCursor,
    };
    pub use crate::inventory::services::{
        DockerfileClassifier, FromLineExtractor, LanguageFilter, RepositoryFilter,
    };
    pub use crate::ports::outbound::{
        HostError, HostResult, OutputPresenter, ProgressReporter, RepositoryHost,
    };
    pub use crate::shared::Result;
}
