use super::Component;

/// SbomMetadata value object representing SBOM metadata
#[derive(Debug, Clone)]
pub struct SbomMetadata {
    timestamp: String,
    tool_name: String,
    tool_version: String,
}

impl SbomMetadata {
    pub fn new(timestamp: String, tool_name: String, tool_version: String) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }
}

/// The assembled document: global attributes plus the component list
#[derive(Debug, Clone)]
pub struct BomDocument {
    spec_version: &'static str,
    version: u32,
    serial_number: Option<String>,
    metadata: SbomMetadata,
    components: Vec<Component>,
}

impl BomDocument {
    pub fn new(
        spec_version: &'static str,
        serial_number: Option<String>,
        metadata: SbomMetadata,
        components: Vec<Component>,
    ) -> Self {
        Self {
            spec_version,
            version: 1,
            serial_number,
            metadata,
            components,
        }
    }

    pub fn spec_version(&self) -> &str {
        self.spec_version
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    pub fn metadata(&self) -> &SbomMetadata {
        &self.metadata
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}
