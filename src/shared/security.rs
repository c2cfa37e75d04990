use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum configuration file size (1 MB)
pub const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Maximum length of a branch, tag, or commit reference
pub const MAX_GIT_REF_LENGTH: usize = 255;

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than `max_size`
pub fn validate_regular_file(path: &Path, file_description: &str, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    if metadata.len() > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            metadata.len(),
            max_size
        );
    }

    Ok(())
}

/// Validates a branch, tag, or commit reference before it is sent to the host
///
/// # Errors
/// Returns an error for empty, overlong, or control-character references
pub fn validate_git_ref(git_ref: &str) -> Result<()> {
    if git_ref.trim().is_empty() {
        anyhow::bail!("Branch reference must not be empty");
    }

    if git_ref.len() > MAX_GIT_REF_LENGTH {
        anyhow::bail!(
            "Branch reference is too long ({} bytes). Maximum allowed: {} bytes",
            git_ref.len(),
            MAX_GIT_REF_LENGTH
        );
    }

    if git_ref.chars().any(|c| c.is_control() || c.is_whitespace()) {
        anyhow::bail!("Branch reference contains whitespace or control characters");
    }

    Ok(())
}
