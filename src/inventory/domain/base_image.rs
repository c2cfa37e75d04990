/// Base image reference taken from a `FROM` instruction,
/// e.g. `golang:1.21` or `ghcr.io/org/app:v2`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseImageRef(String);

impl BaseImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for BaseImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BaseImageRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
