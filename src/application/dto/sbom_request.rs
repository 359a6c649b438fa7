use std::path::PathBuf;

/// SbomRequest - request DTO for the SBOM generation use case
#[derive(Debug, Clone)]
pub struct SbomRequest {
    /// Project directory containing the root `package.json`
    pub project_path: PathBuf,
    /// Treat the root's devDependencies as required
    pub include_dev_dependencies: bool,
    /// Emit a random `urn:uuid:` serial number
    pub include_serial_number: bool,
    /// Classify licenses at all
    pub include_license_data: bool,
    /// Attach license texts found next to packages
    pub include_license_text: bool,
}

impl SbomRequest {
    pub fn new(project_path: PathBuf) -> Self {
        Self {
            project_path,
            include_dev_dependencies: false,
            include_serial_number: true,
            include_license_data: true,
            include_license_text: true,
        }
    }

    pub fn with_dev_dependencies(mut self, include: bool) -> Self {
        self.include_dev_dependencies = include;
        self
    }

    pub fn with_serial_number(mut self, include: bool) -> Self {
        self.include_serial_number = include;
        self
    }

    pub fn with_license_data(mut self, include: bool) -> Self {
        self.include_license_data = include;
        self
    }

    pub fn with_license_text(mut self, include: bool) -> Self {
        self.include_license_text = include;
        self
    }
}
