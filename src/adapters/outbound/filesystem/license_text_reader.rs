use crate::ports::outbound::LicenseTextReader;
use crate::shared::error::SbomError;
use crate::shared::security::read_limited_to_string;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemLicenseReader adapter probing license files on disk
///
/// Only regular files count as existing; directories and symbolic links
/// named like license files are skipped.
pub struct FileSystemLicenseReader;

impl FileSystemLicenseReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemLicenseReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LicenseTextReader for FileSystemLicenseReader {
    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path)
            .map(|metadata| metadata.is_file())
            .unwrap_or(false)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        read_limited_to_string(path, "license file").map_err(|e| {
            SbomError::LicenseTextReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}
