use crate::inventory::domain::BaseImageRef;
use crate::shared::Result;

/// OutputPresenter port for emitting base image references
///
/// References are presented one at a time, as soon as they are found.
pub trait OutputPresenter {
    /// Presents a single base image reference to the output destination
    ///
    /// # Errors
    /// Returns an error if writing to the output destination fails
    fn present(&self, image: &BaseImageRef) -> Result<()>;
}
