use crate::shared::Result;

/// Maximum length for GitHub account logins
const MAX_ACCOUNT_NAME_LENGTH: usize = 39;

/// Maximum length for GitHub repository names
const MAX_REPOSITORY_NAME_LENGTH: usize = 100;

/// NewType wrapper for a GitHub user or organization login
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountName(String);

impl AccountName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Account name cannot be empty");
        }

        if name.len() > MAX_ACCOUNT_NAME_LENGTH {
            anyhow::bail!(
                "Account name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_ACCOUNT_NAME_LENGTH
            );
        }

        // Logins end up in URL paths, so only the GitHub login alphabet is accepted.
        // Underscores appear in enterprise managed user logins.
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            anyhow::bail!(
                "Account name '{}' contains invalid characters. Only ASCII alphanumerics, hyphens, and underscores are allowed.",
                name
            );
        }

        Ok(Self(name))
    }

    /// Accepts an owner login exactly as the host listed it
    ///
    /// Only the checks that keep the login usable as a single URL path
    /// segment apply.
    pub fn from_listing(name: String) -> Result<Self> {
        check_path_segment("Account name", &name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for a repository name with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Repository name cannot be empty");
        }

        if name.len() > MAX_REPOSITORY_NAME_LENGTH {
            anyhow::bail!(
                "Repository name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_REPOSITORY_NAME_LENGTH
            );
        }

        if name == "." || name == ".." {
            anyhow::bail!("Repository name cannot be '{}'", name);
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            anyhow::bail!(
                "Repository name '{}' contains invalid characters. Only ASCII alphanumerics, hyphens, underscores, and dots are allowed.",
                name
            );
        }

        Ok(Self(name))
    }

    /// Accepts a repository name exactly as the host listed it
    pub fn from_listing(name: String) -> Result<Self> {
        check_path_segment("Repository name", &name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A host-provided name must form exactly one URL path segment
fn check_path_segment(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("{} cannot be empty", kind);
    }
    if name == "." || name == ".." {
        anyhow::bail!("{} cannot be '{}'", kind, name);
    }
    if name.chars().any(|c| c == '/' || c.is_control()) {
        anyhow::bail!("{} '{}' is not a single path segment", kind, name.escape_debug());
    }
    Ok(())
}

impl std::fmt::Display for RepositoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Repository value object as reported by the account's repository listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    owner: AccountName,
    name: RepositoryName,
    default_branch: Option<String>,
}

impl Repository {
    pub fn new(owner: AccountName, name: RepositoryName, default_branch: Option<String>) -> Self {
        Self {
            owner,
            name,
            default_branch,
        }
    }

    pub fn owner(&self) -> &AccountName {
        &self.owner
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn default_branch(&self) -> Option<&str> {
        self.default_branch.as_deref()
    }

    /// "owner/name" form used in diagnostics
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}
