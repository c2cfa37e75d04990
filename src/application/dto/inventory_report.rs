use crate::inventory::domain::ScanCursor;
use chrono::{DateTime, Utc};

/// How an inventory run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryOutcome {
    /// Every repository from the start index onward was processed
    Completed,
    /// The host signalled a rate limit; nothing at or after the cursor was finished
    RateLimited {
        /// Repository that was being scanned, `None` if listing was interrupted
        repository: Option<String>,
        reset_at: DateTime<Utc>,
    },
}

/// InventoryReport - Result of the inventory use case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryReport {
    pub outcome: InventoryOutcome,
    /// Resume position; pass it back as the start index after a rate limit
    pub cursor: ScanCursor,
    pub repositories_total: usize,
    pub repositories_scanned: usize,
    pub repositories_excluded: usize,
    pub dockerfiles_read: usize,
    pub images_found: usize,
}

impl InventoryReport {
    pub fn new(outcome: InventoryOutcome, cursor: ScanCursor) -> Self {
        Self {
            outcome,
            cursor,
            repositories_total: 0,
            repositories_scanned: 0,
            repositories_excluded: 0,
            dockerfiles_read: 0,
            images_found: 0,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self.outcome, InventoryOutcome::RateLimited { .. })
    }
}

/// ScanSummary - What scanning a single repository produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// False when the language pre-filter skipped the repository
    pub walked: bool,
    pub dockerfiles_found: usize,
    pub dockerfiles_read: usize,
    pub images_emitted: usize,
}

impl ScanSummary {
    /// Summary for a repository the language pre-filter skipped
    pub fn skipped() -> Self {
        Self::default()
    }

    pub fn walked(dockerfiles_found: usize) -> Self {
        Self {
            walked: true,
            dockerfiles_found,
            ..Self::default()
        }
    }
}
