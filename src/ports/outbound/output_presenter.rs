use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (stdout or a file)
/// where the serialized document is written.
pub trait OutputPresenter {
    /// Presents the formatted SBOM content to the output destination
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
