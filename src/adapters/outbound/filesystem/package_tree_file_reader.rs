use super::manifest::PackageManifest;
use crate::ports::outbound::{PackageTreeReader, TreeReadOptions};
use crate::sbom_generation::domain::PackageNode;
use crate::shared::error::SbomError;
use crate::shared::security::read_limited_to_string;
use crate::shared::Result;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// PackageTreeFileReader adapter for a pre-resolved tree dump
///
/// The dump is the JSON shape produced by `read-installed` style
/// providers: each node carries its manifest fields plus `realPath`,
/// `extraneous` and a `dependencies` map whose values are nested nodes
/// or back-reference strings.
pub struct PackageTreeFileReader {
    tree_path: PathBuf,
}

impl PackageTreeFileReader {
    pub fn new(tree_path: PathBuf) -> Self {
        Self { tree_path }
    }

    fn tree_error(&self, details: impl Into<String>) -> anyhow::Error {
        SbomError::PackageTreeReadError {
            path: self.tree_path.clone(),
            details: details.into(),
        }
        .into()
    }

    fn node_from_map(
        &self,
        key: &str,
        mut fields: Map<String, Value>,
        base_dir: &Path,
    ) -> Result<PackageNode> {
        let dependencies = fields.remove("dependencies");
        let real_path = fields
            .get("realPath")
            .and_then(Value::as_str)
            .map(|path| base_dir.join(path))
            .unwrap_or_default();
        let extraneous = fields
            .get("extraneous")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let manifest = PackageManifest::from_value(Value::Object(fields))
            .map_err(|e| self.tree_error(format!("package '{}': {}", key, e)))?;
        let mut node = manifest.to_node(key, real_path);
        node.extraneous = extraneous;

        let dependencies = match dependencies {
            None | Some(Value::Null) => return Ok(node),
            Some(Value::Object(dependencies)) => dependencies,
            Some(_) => {
                return Err(self.tree_error(format!(
                    "dependencies of '{}' must be an object",
                    node.display_id()
                )))
            }
        };

        for (name, entry) in dependencies {
            node = match entry {
                Value::Object(child) => {
                    let child = self.node_from_map(&name, child, base_dir)?;
                    node.with_dependency(name, child)
                }
                Value::String(marker) => node.with_back_reference(name, marker),
                _ => {
                    return Err(self.tree_error(format!(
                        "dependency '{}' of '{}' must be a package object or a string",
                        name,
                        node.display_id()
                    )))
                }
            };
        }

        Ok(node)
    }
}

impl PackageTreeReader for PackageTreeFileReader {
    fn read_tree(&self, project_path: &Path, options: TreeReadOptions) -> Result<PackageNode> {
        if options.include_dev_dependencies {
            tracing::debug!("tree dump carries its own extraneous flags, dev option ignored");
        }

        let content = read_limited_to_string(&self.tree_path, "package tree")
            .map_err(|e| self.tree_error(e.to_string()))?;
        let value: Value =
            serde_json::from_str(&content).map_err(|e| self.tree_error(e.to_string()))?;
        let Value::Object(root) = value else {
            return Err(self.tree_error("root of the package tree must be an object"));
        };

        // Relative realPath values are relative to the dump itself
        let base_dir = self
            .tree_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(project_path);

        let fallback = project_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.node_from_map(&fallback, root, base_dir)
    }
}
