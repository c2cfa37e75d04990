/// Data Transfer Objects for application layer
///
/// DTOs carry data between the CLI and the use cases, keeping the
/// domain layer isolated.
mod inventory_report;
mod inventory_request;

pub use inventory_report::{InventoryOutcome, InventoryReport, ScanSummary};
pub use inventory_request::{InventoryRequest, InventoryRequestBuilder};
