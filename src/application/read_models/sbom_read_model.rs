//! SBOM read model for query operations
//!
//! Aggregates everything a formatter renders, in a serialization-friendly
//! shape.

use super::component_view::ComponentView;

/// Main read model for SBOM data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomReadModel {
    /// CycloneDX specification version
    pub spec_version: String,
    /// Document version, always 1
    pub version: u32,
    pub serial_number: Option<String>,
    pub metadata: SbomMetadataView,
    pub components: Vec<ComponentView>,
}

/// View representation of SBOM metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomMetadataView {
    /// Timestamp when the SBOM was created
    pub timestamp: String,
    /// Name of the tool that generated the SBOM
    pub tool_name: String,
    /// Version of the tool
    pub tool_version: String,
}
