use crate::inventory::domain::BaseImageRef;
use regex::Regex;
use std::sync::LazyLock;

/// Instruction prefix checked against each trimmed line
const FROM_PREFIX: &str = "FROM ";

/// Image token: registry, path and tag characters bounded by ASCII word edges
static IMAGE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)([a-zA-Z0-9\-.:/]+)(?::latest)?(?-u:\b)")
        .expect("image token pattern is valid")
});

/// Stage aliases and platform-qualified builds are not plain base images
static EXCLUDED_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)(?:AS|platform|TARGETARCH)(?-u:\b)")
        .expect("excluded keyword pattern is valid")
});

/// FromLineExtractor pulls base image references out of Dockerfile text
///
/// Each line is trimmed and checked for the case-sensitive `FROM ` prefix.
/// Lines whose argument mentions `AS`, `platform` or `TARGETARCH` as a whole
/// word are skipped. Otherwise the first image-like token is taken. Results
/// keep line order and duplicates.
///
/// The keyword check is deliberately coarse: an image whose name contains one
/// of the keywords as a whole word is skipped too.
pub struct FromLineExtractor;

impl FromLineExtractor {
    pub fn extract_base_images(content: &str) -> Vec<BaseImageRef> {
        content
            .lines()
            .filter_map(|line| line.trim().strip_prefix(FROM_PREFIX))
            .filter(|argument| !EXCLUDED_KEYWORDS.is_match(argument))
            .filter_map(|argument| {
                IMAGE_TOKEN
                    .captures(argument)
                    .and_then(|captures| captures.get(1))
                    .map(|token| BaseImageRef::new(token.as_str()))
            })
            .collect()
    }
}
