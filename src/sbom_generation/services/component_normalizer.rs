use super::{HashExtractor, LicenseResolver, PackageTypeClassifier};
use crate::ports::outbound::LicenseTextReader;
use crate::sbom_generation::domain::{
    Component, Diagnostic, ExternalReference, ExternalReferenceType, PackageName, PackageNode,
    SpdxLicenseTable,
};
use crate::shared::Result;
use anyhow::Context;
use packageurl::PackageUrl;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters `packageurl` percent-encodes inside a purl segment
const PURL_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'\\')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// Switches controlling how much license data ends up in a component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationOptions {
    /// Run license classification at all
    pub include_license_data: bool,
    /// Look up license texts on disk (only with license data)
    pub include_license_text: bool,
}

impl Default for NormalizationOptions {
    fn default() -> Self {
        Self {
            include_license_data: true,
            include_license_text: true,
        }
    }
}

/// A component plus the non-fatal problems found while building it
#[derive(Debug, Clone)]
pub struct NormalizedComponent {
    pub component: Component,
    pub diagnostics: Vec<Diagnostic>,
}

/// ComponentNormalizer service turning one package node into a component
pub struct ComponentNormalizer<'a, R: LicenseTextReader> {
    licenses: LicenseResolver<'a, R>,
    options: NormalizationOptions,
}

impl<'a, R: LicenseTextReader> ComponentNormalizer<'a, R> {
    pub fn new(spdx: &'a SpdxLicenseTable, reader: &'a R, options: NormalizationOptions) -> Self {
        Self {
            licenses: LicenseResolver::new(spdx, reader, options.include_license_text),
            options,
        }
    }

    /// Builds the component for a non-root, non-extraneous node
    ///
    /// # Errors
    /// Propagates invalid names, malformed integrity data and unreadable
    /// license files
    pub fn normalize(&self, node: &PackageNode) -> Result<NormalizedComponent> {
        let name = PackageName::parse(&node.name)
            .with_context(|| format!("Invalid package name in {}", node.display_id()))?;
        let purl = package_url(&name, &node.version)?;

        let (licenses, diagnostics) = if self.options.include_license_data {
            let resolution = self.licenses.resolve(node)?;
            (resolution.licenses, resolution.diagnostics)
        } else {
            (None, Vec::new())
        };

        let component = Component::new(
            purl,
            PackageTypeClassifier::classify(node),
            name.scope().map(str::to_string),
            name.name().to_string(),
            node.version.clone(),
        )
        .with_description(node.description.clone())
        .with_licenses(licenses)
        .with_hashes(HashExtractor::extract(node)?)
        .with_external_references(external_references(node));

        Ok(NormalizedComponent {
            component,
            diagnostics,
        })
    }
}

/// `pkg:npm/[scope/]name@version` with the name spelled as published
///
/// `packageurl` lowercases npm names, but the registry treats
/// `JSONStream` and `jsonstream` as different packages, so the name
/// segment is re-encoded from the original spelling.
fn package_url(name: &PackageName, version: &str) -> Result<String> {
    let mut purl = PackageUrl::new("npm", name.name())
        .map_err(|e| anyhow::anyhow!("Cannot build package URL for {}: {}", name, e))?;
    if let Some(scope) = name.scope() {
        purl.with_namespace(scope);
    }

    let unversioned = purl.to_string();
    let lowered = utf8_percent_encode(purl.name(), PURL_SEGMENT).to_string();
    let prefix = unversioned.strip_suffix(&lowered).ok_or_else(|| {
        anyhow::anyhow!("Cannot build package URL for {}: unexpected name segment", name)
    })?;

    let mut rendered = format!("{}{}", prefix, utf8_percent_encode(name.name(), PURL_SEGMENT));
    if !version.is_empty() {
        purl.with_version(version);
        rendered.push_str(&purl.to_string()[unversioned.len()..]);
    }
    Ok(rendered)
}

fn external_references(node: &PackageNode) -> Vec<ExternalReference> {
    [
        (ExternalReferenceType::Website, &node.homepage),
        (ExternalReferenceType::IssueTracker, &node.bugs_url),
        (ExternalReferenceType::Vcs, &node.repository_url),
    ]
    .into_iter()
    .filter_map(|(reference_type, url)| {
        url.as_deref()
            .filter(|url| !url.is_empty())
            .map(|url| ExternalReference::new(reference_type, url.to_string()))
    })
    .collect()
}
