/// Component classification derived from package keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Library,
    Framework,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Library => "library",
            ComponentType::Framework => "framework",
        }
    }
}

/// Content type of an attached license text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LicenseContentType {
    Plain,
    Txt,
    Markdown,
    Xml,
}

impl LicenseContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseContentType::Plain => "text/plain",
            LicenseContentType::Txt => "text/txt",
            LicenseContentType::Markdown => "text/markdown",
            LicenseContentType::Xml => "text/xml",
        }
    }

    /// File extension probed for this content type
    pub fn extension(&self) -> &'static str {
        match self {
            LicenseContentType::Plain => "",
            LicenseContentType::Txt => ".txt",
            LicenseContentType::Markdown => ".md",
            LicenseContentType::Xml => ".xml",
        }
    }

    /// `text/plain` is implied and never rendered
    pub fn is_default(&self) -> bool {
        matches!(self, LicenseContentType::Plain)
    }
}

/// License text found on disk next to the package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseText {
    content: String,
    content_type: LicenseContentType,
}

impl LicenseText {
    pub fn new(content: String, content_type: LicenseContentType) -> Self {
        Self {
            content,
            content_type,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_type(&self) -> LicenseContentType {
        self.content_type
    }
}

/// SPDX identifier or free-text license name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseKind {
    Id(String),
    Name(String),
}

/// One classified license of a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseChoice {
    kind: LicenseKind,
    text: Option<LicenseText>,
}

impl LicenseChoice {
    pub fn new(kind: LicenseKind, text: Option<LicenseText>) -> Self {
        Self { kind, text }
    }

    pub fn kind(&self) -> &LicenseKind {
        &self.kind
    }

    pub fn id(&self) -> Option<&str> {
        match &self.kind {
            LicenseKind::Id(id) => Some(id),
            LicenseKind::Name(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            LicenseKind::Id(_) => None,
            LicenseKind::Name(name) => Some(name),
        }
    }

    pub fn text(&self) -> Option<&LicenseText> {
        self.text.as_ref()
    }
}

/// Hash algorithms accepted in component hashes, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha512,
    Sha384,
    Sha256,
    Sha1,
}

impl HashAlgorithm {
    /// Extraction order for integrity strings
    pub const STRONGEST_FIRST: [HashAlgorithm; 4] = [
        HashAlgorithm::Sha512,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha1,
    ];

    /// Algorithm prefix used in Subresource Integrity strings
    pub fn sri_name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha1 => "sha1",
        }
    }

    /// Algorithm name used in the CycloneDX document
    pub fn cyclonedx_name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha512 => "SHA-512",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha1 => "SHA-1",
        }
    }

    pub fn from_sri_name(name: &str) -> Option<Self> {
        Self::STRONGEST_FIRST
            .into_iter()
            .find(|alg| alg.sri_name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentHash {
    algorithm: HashAlgorithm,
    digest: String,
}

impl ComponentHash {
    pub fn new(algorithm: HashAlgorithm, digest: String) -> Self {
        Self { algorithm, digest }
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hexadecimal digest
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalReferenceType {
    Website,
    IssueTracker,
    Vcs,
}

impl ExternalReferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExternalReferenceType::Website => "website",
            ExternalReferenceType::IssueTracker => "issue-tracker",
            ExternalReferenceType::Vcs => "vcs",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalReference {
    reference_type: ExternalReferenceType,
    url: String,
}

impl ExternalReference {
    pub fn new(reference_type: ExternalReferenceType, url: String) -> Self {
        Self {
            reference_type,
            url,
        }
    }

    pub fn reference_type(&self) -> ExternalReferenceType {
        self.reference_type
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Component entity: one normalized package in the SBOM
///
/// Built once during traversal and never modified afterwards. Empty
/// hash and external reference lists are stored as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    purl: String,
    component_type: ComponentType,
    group: Option<String>,
    name: String,
    version: String,
    description: Option<String>,
    licenses: Option<Vec<LicenseChoice>>,
    hashes: Option<Vec<ComponentHash>>,
    external_references: Option<Vec<ExternalReference>>,
}

impl Component {
    pub fn new(
        purl: String,
        component_type: ComponentType,
        group: Option<String>,
        name: String,
        version: String,
    ) -> Self {
        Self {
            purl,
            component_type,
            group,
            name,
            version,
            description: None,
            licenses: None,
            hashes: None,
            external_references: None,
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// `Some(vec![])` is kept: an empty license list still renders its wrapper
    pub fn with_licenses(mut self, licenses: Option<Vec<LicenseChoice>>) -> Self {
        self.licenses = licenses;
        self
    }

    pub fn with_hashes(mut self, hashes: Vec<ComponentHash>) -> Self {
        self.hashes = (!hashes.is_empty()).then_some(hashes);
        self
    }

    pub fn with_external_references(mut self, references: Vec<ExternalReference>) -> Self {
        self.external_references = (!references.is_empty()).then_some(references);
        self
    }

    /// Package URL; doubles as the BOM reference and deduplication key
    pub fn identifier(&self) -> &str {
        &self.purl
    }

    pub fn purl(&self) -> &str {
        &self.purl
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn licenses(&self) -> Option<&[LicenseChoice]> {
        self.licenses.as_deref()
    }

    pub fn hashes(&self) -> Option<&[ComponentHash]> {
        self.hashes.as_deref()
    }

    pub fn external_references(&self) -> Option<&[ExternalReference]> {
        self.external_references.as_deref()
    }
}
