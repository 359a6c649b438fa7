//! Builder for constructing SbomReadModel from domain objects

use super::component_view::{
    ComponentView, ExternalReferenceView, HashView, LicenseTextView, LicenseView,
};
use super::sbom_read_model::{SbomMetadataView, SbomReadModel};
use crate::sbom_generation::domain::{BomDocument, Component, LicenseChoice, SbomMetadata};

/// Builder turning an assembled document into the read model
pub struct SbomReadModelBuilder;

impl SbomReadModelBuilder {
    pub fn build(document: &BomDocument) -> SbomReadModel {
        SbomReadModel {
            spec_version: document.spec_version().to_string(),
            version: document.version(),
            serial_number: document.serial_number().map(str::to_string),
            metadata: Self::build_metadata(document.metadata()),
            components: document
                .components()
                .iter()
                .map(Self::build_component)
                .collect(),
        }
    }

    fn build_metadata(metadata: &SbomMetadata) -> SbomMetadataView {
        SbomMetadataView {
            timestamp: metadata.timestamp().to_string(),
            tool_name: metadata.tool_name().to_string(),
            tool_version: metadata.tool_version().to_string(),
        }
    }

    fn build_component(component: &Component) -> ComponentView {
        ComponentView {
            bom_ref: component.identifier().to_string(),
            component_type: component.component_type().as_str().to_string(),
            group: component.group().map(str::to_string),
            name: component.name().to_string(),
            version: component.version().to_string(),
            description: component.description().map(str::to_string),
            hashes: component.hashes().map(|hashes| {
                hashes
                    .iter()
                    .map(|hash| HashView {
                        algorithm: hash.algorithm().cyclonedx_name().to_string(),
                        digest: hash.digest().to_string(),
                    })
                    .collect()
            }),
            licenses: component
                .licenses()
                .map(|licenses| licenses.iter().map(Self::build_license).collect()),
            purl: component.purl().to_string(),
            external_references: component.external_references().map(|references| {
                references
                    .iter()
                    .map(|reference| ExternalReferenceView {
                        reference_type: reference.reference_type().as_str().to_string(),
                        url: reference.url().to_string(),
                    })
                    .collect()
            }),
        }
    }

    fn build_license(license: &LicenseChoice) -> LicenseView {
        LicenseView {
            id: license.id().map(str::to_string),
            name: license.name().map(str::to_string),
            text: license.text().map(|text| LicenseTextView {
                content: text.content().to_string(),
                content_type: (!text.content_type().is_default())
                    .then(|| text.content_type().as_str().to_string()),
            }),
        }
    }
}
