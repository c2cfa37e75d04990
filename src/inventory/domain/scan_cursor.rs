/// Index of the next repository to scan within the full listing.
///
/// The cursor only moves forward. On a controlled stop its position is
/// reported so the caller can pass it back as the start index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ScanCursor(usize);

impl ScanCursor {
    pub fn new(start_index: usize) -> Self {
        Self(start_index)
    }

    pub fn position(&self) -> usize {
        self.0
    }

    pub fn advance(&mut self) {
        self.0 += 1;
    }

    /// True once the cursor has moved past the last of `total` repositories
    pub fn is_exhausted(&self, total: usize) -> bool {
        self.0 >= total
    }
}

impl std::fmt::Display for ScanCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
