use crate::shared::Result;
use std::cell::Cell;

/// Maximum number of exclude patterns
const MAX_EXCLUDE_PATTERNS: usize = 64;

/// Maximum length of a single exclude pattern
const MAX_PATTERN_LENGTH: usize = 100;

/// RepositoryFilter - Skips repositories whose names match exclusion patterns
///
/// Supports wildcard patterns using '*' to match zero or more characters.
/// Patterns are case-sensitive and validated against the repository name alphabet.
#[derive(Debug, Default)]
pub struct RepositoryFilter {
    patterns: Vec<ExcludePattern>,
}

impl RepositoryFilter {
    /// Creates a new RepositoryFilter from raw pattern strings
    ///
    /// # Errors
    /// - Too many patterns (> MAX_EXCLUDE_PATTERNS)
    /// - Invalid pattern format (length, characters, wildcards only)
    pub fn new(patterns: Vec<String>) -> Result<Self> {
        if patterns.len() > MAX_EXCLUDE_PATTERNS {
            anyhow::bail!(
                "Too many exclusion patterns: {} (maximum: {})",
                patterns.len(),
                MAX_EXCLUDE_PATTERNS
            );
        }

        let patterns = patterns
            .into_iter()
            .map(ExcludePattern::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Checks if a repository name matches any exclusion pattern
    pub fn matches(&self, repository_name: &str) -> bool {
        // Every pattern is evaluated so unmatched-pattern reporting stays accurate
        self.patterns
            .iter()
            .fold(false, |hit, p| p.matches(repository_name) || hit)
    }

    /// Returns the patterns that did not match any repository so far
    pub fn unmatched_patterns(&self) -> Vec<String> {
        self.patterns
            .iter()
            .filter(|p| !p.matched.get())
            .map(|p| p.original.clone())
            .collect()
    }
}

#[derive(Debug)]
struct ExcludePattern {
    original: String,
    matcher: PatternMatcher,
    matched: Cell<bool>,
}

impl ExcludePattern {
    fn new(pattern: String) -> Result<Self> {
        validate_pattern(&pattern)?;

        let matcher = compile_pattern(&pattern);

        Ok(Self {
            original: pattern,
            matcher,
            matched: Cell::new(false),
        })
    }

    fn matches(&self, repository_name: &str) -> bool {
        let is_match = self.matcher.matches(repository_name);
        if is_match {
            self.matched.set(true);
        }
        is_match
    }
}

#[derive(Debug)]
enum PatternMatcher {
    /// "repo-name"
    Exact(String),
    /// "*-suffix"
    EndsWith(String),
    /// "prefix-*"
    StartsWith(String),
    /// "*middle*"
    Contains(String),
    /// "pre*fix*suf" - literal parts in order, anchored at both ends
    Sequence(Vec<String>),
}

impl PatternMatcher {
    fn matches(&self, name: &str) -> bool {
        match self {
            PatternMatcher::Exact(s) => name == s,
            PatternMatcher::EndsWith(suffix) => name.ends_with(suffix),
            PatternMatcher::StartsWith(prefix) => name.starts_with(prefix),
            PatternMatcher::Contains(middle) => name.contains(middle),
            PatternMatcher::Sequence(parts) => sequence_matches(parts, name),
        }
    }
}

/// Parts come from splitting on '*': the first is anchored at the start,
/// the last at the end, and the ones between must appear in order.
fn sequence_matches(parts: &[String], name: &str) -> bool {
    let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
        return true;
    };
    if parts.len() == 1 {
        return name == first;
    }
    if !name.starts_with(first.as_str()) || !name.ends_with(last.as_str()) {
        return false;
    }
    if first.len() + last.len() > name.len() {
        return false;
    }

    let middle = &name[first.len()..name.len() - last.len()];
    let mut position = 0;
    for part in &parts[1..parts.len() - 1] {
        match middle[position..].find(part.as_str()) {
            Some(found) => position += found + part.len(),
            None => return false,
        }
    }
    true
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Exclusion pattern cannot be empty");
    }

    if pattern.len() > MAX_PATTERN_LENGTH {
        anyhow::bail!(
            "Exclusion pattern is too long: '{}' ({} chars). Maximum: {} chars",
            pattern,
            pattern.len(),
            MAX_PATTERN_LENGTH
        );
    }

    if let Some(ch) = pattern.chars().find(|c| !is_valid_pattern_char(*c)) {
        anyhow::bail!(
            "Exclusion pattern contains invalid character '{}' in pattern '{}'. \
             Only ASCII alphanumerics, hyphens, underscores, dots, and asterisks (*) are allowed.",
            ch,
            pattern
        );
    }

    if pattern.chars().all(|c| c == '*') {
        anyhow::bail!(
            "Exclusion pattern cannot contain only wildcards: '{}'",
            pattern
        );
    }

    Ok(())
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' || c == '*'
}

fn compile_pattern(pattern: &str) -> PatternMatcher {
    let wildcard_count = pattern.matches('*').count();
    let starts = pattern.starts_with('*');
    let ends = pattern.ends_with('*');

    match wildcard_count {
        0 => PatternMatcher::Exact(pattern.to_string()),
        1 if starts => PatternMatcher::EndsWith(pattern[1..].to_string()),
        1 if ends => PatternMatcher::StartsWith(pattern[..pattern.len() - 1].to_string()),
        2 if starts && ends => PatternMatcher::Contains(pattern[1..pattern.len() - 1].to_string()),
        _ => PatternMatcher::Sequence(pattern.split('*').map(str::to_string).collect()),
    }
}
