/// DockerfileClassifier decides which file names count as Dockerfile variants
///
/// A name matches when it is exactly `Dockerfile`, ends with `.Dockerfile`
/// (e.g. `api.Dockerfile`), or starts with `Dockerfile.` (e.g. `Dockerfile.dev`).
/// Matching is case-sensitive and applies to the whole file name.
pub struct DockerfileClassifier;

impl DockerfileClassifier {
    const CANONICAL_NAME: &'static str = "Dockerfile";
    const VARIANT_SUFFIX: &'static str = ".Dockerfile";
    const VARIANT_PREFIX: &'static str = "Dockerfile.";

    pub fn is_dockerfile_name(name: &str) -> bool {
        name == Self::CANONICAL_NAME
            || name.ends_with(Self::VARIANT_SUFFIX)
            || name.starts_with(Self::VARIANT_PREFIX)
    }
}
