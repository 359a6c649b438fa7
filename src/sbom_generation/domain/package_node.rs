use super::LicenseDeclaration;
use crate::shared::Result;
use indexmap::IndexMap;
use std::path::PathBuf;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Package name split into its optional scope and bare name
///
/// `@babel/core` parses into scope `@babel` and name `core`;
/// `lodash` has no scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageName {
    scope: Option<String>,
    name: String,
}

impl PackageName {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        // Security: Length limit to prevent DoS
        if raw.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                raw.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
            anyhow::bail!("Package name '{}' contains whitespace or control characters", raw);
        }

        if raw.starts_with('@') {
            if let Some((scope, name)) = raw.split_once('/') {
                if scope.len() > 1 && !name.is_empty() {
                    return Ok(Self {
                        scope: Some(scope.to_string()),
                        name: name.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            scope: None,
            name: raw.to_string(),
        })
    }

    /// Scope including the leading `@`, if any
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Name without the scope
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}/{}", scope, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// A value in a package's dependency map
#[derive(Debug, Clone, PartialEq)]
pub enum DependencyEntry {
    /// First encounter of an installed package
    Node(Box<PackageNode>),
    /// Marker for a package already materialized elsewhere in the tree
    /// (or a requirement that could not be resolved). Never traversed.
    BackReference(String),
}

/// One installed package as delivered by the package-metadata provider
///
/// The tree is fully materialized before SBOM generation starts and is
/// never mutated by it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PackageNode {
    pub name: String,
    pub version: String,
    pub license: LicenseDeclaration,
    /// Subresource Integrity string (`sha512-... sha1-...`)
    pub integrity: Option<String>,
    /// Legacy SHA-1 checksum, already hex encoded
    pub shasum: Option<String>,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub bugs_url: Option<String>,
    pub repository_url: Option<String>,
    /// Directory containing the installed package
    pub real_path: PathBuf,
    pub keywords: Option<Vec<String>>,
    /// Installed but not required under the active inclusion options
    pub extraneous: bool,
    pub dependencies: IndexMap<String, DependencyEntry>,
}

impl PackageNode {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn with_license(mut self, license: LicenseDeclaration) -> Self {
        self.license = license;
        self
    }

    pub fn with_integrity(mut self, integrity: impl Into<String>) -> Self {
        self.integrity = Some(integrity.into());
        self
    }

    pub fn with_shasum(mut self, shasum: impl Into<String>) -> Self {
        self.shasum = Some(shasum.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    pub fn with_bugs_url(mut self, url: impl Into<String>) -> Self {
        self.bugs_url = Some(url.into());
        self
    }

    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    pub fn with_real_path(mut self, real_path: impl Into<PathBuf>) -> Self {
        self.real_path = real_path.into();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Some(keywords.into_iter().map(Into::into).collect());
        self
    }

    pub fn extraneous(mut self) -> Self {
        self.extraneous = true;
        self
    }

    /// Adds a nested node under the given dependency key
    pub fn with_dependency(mut self, key: impl Into<String>, node: PackageNode) -> Self {
        self.dependencies
            .insert(key.into(), DependencyEntry::Node(Box::new(node)));
        self
    }

    /// Adds a back-reference marker under the given dependency key
    pub fn with_back_reference(
        mut self,
        key: impl Into<String>,
        marker: impl Into<String>,
    ) -> Self {
        self.dependencies
            .insert(key.into(), DependencyEntry::BackReference(marker.into()));
        self
    }

    /// `name@version`, used in diagnostics
    pub fn display_id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }

    /// Number of nodes materialized in this tree, the root included
    pub fn node_count(&self) -> usize {
        1 + self
            .dependencies
            .values()
            .map(|entry| match entry {
                DependencyEntry::Node(node) => node.node_count(),
                DependencyEntry::BackReference(_) => 0,
            })
            .sum::<usize>()
    }
}
