use crate::application::read_models::{ComponentView, LicenseView, SbomReadModel};
use crate::ports::outbound::SbomFormatter;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Bom<'a> {
    bom_format: &'static str,
    spec_version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    serial_number: Option<&'a str>,
    version: u32,
    metadata: Metadata<'a>,
    components: Vec<Component<'a>>,
}

#[derive(Debug, Serialize)]
struct Metadata<'a> {
    timestamp: &'a str,
    tools: Vec<Tool<'a>>,
}

#[derive(Debug, Serialize)]
struct Tool<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Component<'a> {
    #[serde(rename = "type")]
    component_type: &'a str,
    #[serde(rename = "bom-ref")]
    bom_ref: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<&'a str>,
    name: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hashes: Option<Vec<Hash<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    licenses: Option<Vec<License<'a>>>,
    purl: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_references: Option<Vec<ExternalReference<'a>>>,
}

#[derive(Debug, Serialize)]
struct Hash<'a> {
    alg: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct License<'a> {
    license: LicenseContent<'a>,
}

#[derive(Debug, Serialize)]
struct LicenseContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<LicenseText<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LicenseText<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<&'a str>,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ExternalReference<'a> {
    #[serde(rename = "type")]
    reference_type: &'a str,
    url: &'a str,
}

/// CycloneDxJsonFormatter adapter for the CycloneDX JSON encoding
///
/// Same value model as the XML output; absent optional fields are not
/// serialized.
pub struct CycloneDxJsonFormatter;

impl CycloneDxJsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CycloneDxJsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for CycloneDxJsonFormatter {
    fn format(&self, model: &SbomReadModel) -> Result<String> {
        let bom = Bom {
            bom_format: "CycloneDX",
            spec_version: &model.spec_version,
            serial_number: model.serial_number.as_deref(),
            version: model.version,
            metadata: Metadata {
                timestamp: &model.metadata.timestamp,
                tools: vec![Tool {
                    name: &model.metadata.tool_name,
                    version: &model.metadata.tool_version,
                }],
            },
            components: model.components.iter().map(build_component).collect(),
        };

        serde_json::to_string_pretty(&bom).map_err(Into::into)
    }
}

fn build_component(component: &ComponentView) -> Component<'_> {
    Component {
        component_type: &component.component_type,
        bom_ref: &component.bom_ref,
        group: component.group.as_deref(),
        name: &component.name,
        version: &component.version,
        description: component.description.as_deref(),
        hashes: component.hashes.as_ref().map(|hashes| {
            hashes
                .iter()
                .map(|hash| Hash {
                    alg: &hash.algorithm,
                    content: &hash.digest,
                })
                .collect()
        }),
        licenses: component
            .licenses
            .as_ref()
            .map(|licenses| licenses.iter().map(build_license).collect()),
        purl: &component.purl,
        external_references: component.external_references.as_ref().map(|references| {
            references
                .iter()
                .map(|reference| ExternalReference {
                    reference_type: &reference.reference_type,
                    url: &reference.url,
                })
                .collect()
        }),
    }
}

fn build_license(license: &LicenseView) -> License<'_> {
    License {
        license: LicenseContent {
            id: license.id.as_deref(),
            name: license.name.as_deref(),
            text: license.text.as_ref().map(|text| LicenseText {
                content_type: text.content_type.as_deref(),
                content: &text.content,
            }),
        },
    }
}
