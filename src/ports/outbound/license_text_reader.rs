use crate::shared::Result;
use std::path::Path;

/// LicenseTextReader port for probing license files next to a package
///
/// The license resolver asks for candidate files in priority order and
/// reads the first one that exists.
pub trait LicenseTextReader {
    /// Whether a regular file exists at the path
    fn exists(&self, path: &Path) -> bool;

    /// Reads the whole file as UTF-8 text
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read. Callers
    /// treat this as fatal.
    fn read_text(&self, path: &Path) -> Result<String>;
}

impl<T: LicenseTextReader + ?Sized> LicenseTextReader for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        (**self).read_text(path)
    }
}
