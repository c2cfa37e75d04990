use crate::inventory::domain::AccountName;
use crate::shared::error::InventoryError;
use crate::shared::security::validate_git_ref;
use crate::shared::Result;

/// InventoryRequest - Input of the inventory use case
#[derive(Debug, Clone)]
pub struct InventoryRequest {
    /// GitHub user or organization whose repositories are scanned
    pub account: AccountName,
    /// Branch, tag, or commit that trees and files are read at
    pub branch_ref: String,
    /// Whether subdirectories are walked
    pub recursive: bool,
    /// Position in the full repository listing to resume from
    pub start_index: usize,
    /// Patterns for repositories to skip
    pub exclude_patterns: Vec<String>,
}

impl InventoryRequest {
    pub fn builder() -> InventoryRequestBuilder {
        InventoryRequestBuilder::default()
    }
}

/// Builder for [`InventoryRequest`]; `account` and `branch_ref` are required
#[derive(Debug, Default)]
pub struct InventoryRequestBuilder {
    account: Option<String>,
    branch_ref: Option<String>,
    recursive: bool,
    start_index: usize,
    exclude_patterns: Vec<String>,
}

impl InventoryRequestBuilder {
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn branch_ref(mut self, branch_ref: impl Into<String>) -> Self {
        self.branch_ref = Some(branch_ref.into());
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn build(self) -> Result<InventoryRequest> {
        let account = self.account.ok_or_else(|| InventoryError::Validation {
            message: "account is required".to_string(),
        })?;
        let account = AccountName::new(account).map_err(|e| InventoryError::Validation {
            message: e.to_string(),
        })?;

        let branch_ref = self.branch_ref.ok_or_else(|| InventoryError::Validation {
            message: "branch_ref is required".to_string(),
        })?;
        validate_git_ref(&branch_ref).map_err(|e| InventoryError::Validation {
            message: e.to_string(),
        })?;

        Ok(InventoryRequest {
            account,
            branch_ref,
            recursive: self.recursive,
            start_index: self.start_index,
            exclude_patterns: self.exclude_patterns,
        })
    }
}
