pub mod base_image;
pub mod directory_entry;
pub mod repository;
pub mod scan_cursor;

pub use base_image::BaseImageRef;
pub use directory_entry::{DirectoryEntry, EntryKind};
pub use repository::{AccountName, Repository, RepositoryName};
pub use scan_cursor::ScanCursor;

/// Language name to byte count, as reported for a repository
pub type LanguageBreakdown = std::collections::HashMap<String, u64>;
