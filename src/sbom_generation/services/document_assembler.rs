use crate::sbom_generation::domain::{BomDocument, Component, SbomMetadata};
use chrono::Utc;
use uuid::Uuid;

/// CycloneDX specification version of every emitted document
pub const SPEC_VERSION: &str = "1.4";

/// Tool name recorded in the document metadata
pub const TOOL_NAME: &str = "npm-sbom";

/// DocumentAssembler service wrapping components into a document
///
/// Pure business logic: timestamp, optional serial number and tool
/// information. Rendering is left to the formatters.
pub struct DocumentAssembler;

impl DocumentAssembler {
    /// Generates metadata with the current UTC timestamp
    pub fn generate_metadata(tool_name: &str, tool_version: &str) -> SbomMetadata {
        SbomMetadata::new(
            Utc::now().to_rfc3339(),
            tool_name.to_string(),
            tool_version.to_string(),
        )
    }

    /// Metadata naming this tool, using the compile-time crate version
    pub fn generate_default_metadata() -> SbomMetadata {
        Self::generate_metadata(TOOL_NAME, env!("CARGO_PKG_VERSION"))
    }

    /// Random `urn:uuid:` serial number
    pub fn generate_serial_number() -> String {
        format!("urn:uuid:{}", Uuid::new_v4())
    }

    pub fn assemble(components: Vec<Component>, include_serial_number: bool) -> BomDocument {
        let serial_number = include_serial_number.then(Self::generate_serial_number);
        BomDocument::new(
            SPEC_VERSION,
            serial_number,
            Self::generate_default_metadata(),
            components,
        )
    }
}
