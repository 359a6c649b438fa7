use npm_sbom::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock LicenseTextReader backed by an in-memory file map
///
/// Records every probed path so tests can check the search order.
#[derive(Default, Clone)]
pub struct MockLicenseReader {
    files: HashMap<PathBuf, String>,
    pub probes: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockLicenseReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }

    pub fn probe_count(&self) -> usize {
        self.probes.lock().unwrap().len()
    }
}

impl LicenseTextReader for MockLicenseReader {
    fn exists(&self, path: &Path) -> bool {
        self.probes.lock().unwrap().push(path.to_path_buf());
        self.files.contains_key(path)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No such file: {}", path.display()))
    }
}
