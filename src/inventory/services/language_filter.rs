use crate::inventory::domain::LanguageBreakdown;

/// LanguageFilter - cheap pre-filter applied before any tree walk
///
/// Repositories whose language breakdown does not list `Dockerfile`
/// are not worth listing.
pub struct LanguageFilter;

impl LanguageFilter {
    pub const DOCKERFILE_LANGUAGE: &'static str = "Dockerfile";

    pub fn reports_dockerfile(languages: &LanguageBreakdown) -> bool {
        languages.contains_key(Self::DOCKERFILE_LANGUAGE)
    }
}
