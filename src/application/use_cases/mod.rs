/// Use cases module containing application business logic orchestration
mod list_dockerfiles;
mod run_inventory;
mod scan_repository;

#[cfg(test)]
pub(crate) mod test_support;

pub use list_dockerfiles::{ListDockerfilesUseCase, DEFAULT_MAX_DEPTH};
pub use run_inventory::{RunInventoryUseCase, MAX_REPOSITORY_PAGES};
pub use scan_repository::ScanRepositoryUseCase;
