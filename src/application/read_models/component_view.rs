//! Component view structs for read model
//!
//! Flattened, string-typed view of a component as the formatters need it.

/// View representation of a software component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentView {
    /// BOM reference identifier (same as the purl)
    pub bom_ref: String,
    /// `library` or `framework`
    pub component_type: String,
    /// Scope including the leading `@`
    pub group: Option<String>,
    pub name: String,
    pub version: String,
    /// Rendered even when absent, as an empty element
    pub description: Option<String>,
    pub hashes: Option<Vec<HashView>>,
    /// `Some(vec![])` renders an empty licenses wrapper
    pub licenses: Option<Vec<LicenseView>>,
    pub purl: String,
    pub external_references: Option<Vec<ExternalReferenceView>>,
}

/// View representation of a component hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashView {
    /// CycloneDX algorithm name, e.g. `SHA-512`
    pub algorithm: String,
    /// Lowercase hex digest
    pub digest: String,
}

/// View representation of license information; exactly one of `id` and
/// `name` is set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseView {
    pub id: Option<String>,
    pub name: Option<String>,
    pub text: Option<LicenseTextView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseTextView {
    pub content: String,
    /// `None` for the implied `text/plain`
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReferenceView {
    /// `website`, `issue-tracker` or `vcs`
    pub reference_type: String,
    pub url: String,
}
