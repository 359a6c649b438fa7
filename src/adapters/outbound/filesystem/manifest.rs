use crate::sbom_generation::domain::{LicenseDeclaration, PackageNode};
use crate::shared::error::SbomError;
use crate::shared::security::read_limited_to_string;
use crate::shared::Result;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Fields of a `package.json` that feed a package node
///
/// Most fields are kept as raw JSON: published manifests disagree on
/// shapes (`bugs` as string or object, `license` as string, object or
/// list), and a single odd field must not reject the whole package.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PackageManifest {
    name: Option<Value>,
    version: Option<Value>,
    license: Option<Value>,
    licenses: Option<Value>,
    #[serde(rename = "_integrity")]
    integrity: Option<Value>,
    #[serde(rename = "_shasum")]
    shasum: Option<Value>,
    description: Option<Value>,
    homepage: Option<Value>,
    bugs: Option<Value>,
    repository: Option<Value>,
    keywords: Option<Value>,
    dependencies: Option<Value>,
    #[serde(rename = "optionalDependencies")]
    optional_dependencies: Option<Value>,
    #[serde(rename = "devDependencies")]
    dev_dependencies: Option<Value>,
}

impl PackageManifest {
    /// Reads and parses `package.json` at the given path
    ///
    /// # Errors
    /// Returns `PackageManifestParseError` when the file cannot be read or
    /// is not a JSON object
    pub fn read(path: &Path) -> Result<Self> {
        let content = read_limited_to_string(path, "package.json").map_err(|e| {
            SbomError::PackageManifestParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
        })?;

        serde_json::from_str(&content).map_err(|e| {
            SbomError::PackageManifestParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn name(&self) -> Option<&str> {
        string_field(&self.name)
    }

    pub fn version(&self) -> &str {
        string_field(&self.version).unwrap_or_default()
    }

    /// Runtime requirements: `dependencies`, then `optionalDependencies`
    /// entries not already listed
    pub fn runtime_dependencies(&self) -> IndexMap<String, String> {
        let mut dependencies = range_map(&self.dependencies);
        for (name, range) in range_map(&self.optional_dependencies) {
            dependencies.entry(name).or_insert(range);
        }
        dependencies
    }

    pub fn dev_dependencies(&self) -> IndexMap<String, String> {
        range_map(&self.dev_dependencies)
    }

    /// Package node without dependencies or extraneous flag
    pub fn to_node(&self, fallback_name: &str, real_path: PathBuf) -> PackageNode {
        let license = match LicenseDeclaration::from_json(self.license.as_ref()) {
            LicenseDeclaration::Absent => LicenseDeclaration::from_json(self.licenses.as_ref()),
            declared => declared,
        };

        PackageNode {
            name: self.name().unwrap_or(fallback_name).to_string(),
            version: self.version().to_string(),
            license,
            integrity: owned(string_field(&self.integrity)),
            shasum: owned(string_field(&self.shasum)),
            description: owned(string_field(&self.description)),
            homepage: owned(string_field(&self.homepage)),
            bugs_url: owned(url_field(&self.bugs)),
            repository_url: owned(url_field(&self.repository)),
            real_path,
            keywords: self.keywords.as_ref().and_then(Value::as_array).map(|keywords| {
                keywords
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            }),
            ..PackageNode::default()
        }
    }
}

fn string_field(value: &Option<Value>) -> Option<&str> {
    value.as_ref().and_then(Value::as_str)
}

/// `{ "url": "..." }` or a bare string
fn url_field(value: &Option<Value>) -> Option<&str> {
    match value.as_ref()? {
        Value::String(url) => Some(url),
        Value::Object(map) => map.get("url").and_then(Value::as_str),
        _ => None,
    }
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

fn range_map(value: &Option<Value>) -> IndexMap<String, String> {
    value
        .as_ref()
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(name, range)| {
                    (name.clone(), range.as_str().unwrap_or_default().to_string())
                })
                .collect()
        })
        .unwrap_or_default()
}
