use super::manifest::PackageManifest;
use crate::ports::outbound::{PackageTreeReader, TreeReadOptions};
use crate::sbom_generation::domain::PackageNode;
use crate::shared::error::SbomError;
use crate::shared::Result;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST_FILE: &str = "package.json";
const MODULES_DIR: &str = "node_modules";

/// NodeModulesReader adapter scanning an installed npm project
///
/// Every directory under `node_modules` (including `@scope/<name>`) with
/// a `package.json` is a package. Declared requirements are resolved
/// the way Node does, by looking in the requiring package's
/// `node_modules` and then in each ancestor's. Packages that nothing
/// requires under the active options are kept but flagged extraneous.
pub struct NodeModulesReader;

impl NodeModulesReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NodeModulesReader {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageTreeReader for NodeModulesReader {
    fn read_tree(&self, project_path: &Path, options: TreeReadOptions) -> Result<PackageNode> {
        let installed = InstalledTree::load(project_path)?;
        tracing::debug!(
            packages = installed.packages.len(),
            root = %installed.packages[0].dir.display(),
            "scanned node_modules"
        );
        Ok(installed.materialize(options))
    }
}

#[derive(Debug)]
struct InstalledPackage {
    dir: PathBuf,
    /// Name under which the directory was found; the root uses its directory name
    dir_name: String,
    manifest: PackageManifest,
    parent: Option<usize>,
    /// Packages installed in this package's own `node_modules`
    children: IndexMap<String, usize>,
}

#[derive(Debug)]
struct Requirement {
    name: String,
    range: String,
    dev: bool,
    target: Option<usize>,
}

/// Arena of every installed package; index 0 is the project root
#[derive(Debug)]
struct InstalledTree {
    packages: Vec<InstalledPackage>,
    by_dir: HashMap<PathBuf, usize>,
}

#[derive(Debug, Clone)]
enum Slot {
    Package(usize),
    Marker(String),
}

impl InstalledTree {
    fn load(project_path: &Path) -> Result<Self> {
        let manifest_path = project_path.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(SbomError::PackageManifestNotFound {
                path: manifest_path,
                suggestion: format!(
                    "package.json does not exist in project directory \"{}\".\n   \
                     Please run in the root directory of an npm project, or specify the correct path with the --path option.",
                    project_path.display()
                ),
            }
            .into());
        }

        let root_dir = canonical_dir(project_path)?;
        let dir_name = root_dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut tree = Self {
            packages: Vec::new(),
            by_dir: HashMap::new(),
        };
        tree.load_package(root_dir, dir_name, None)?;
        Ok(tree)
    }

    /// Loads a package directory and, recursively, its `node_modules`.
    /// Returns `None` for directories without a manifest.
    fn load_package(
        &mut self,
        dir: PathBuf,
        dir_name: String,
        parent: Option<usize>,
    ) -> Result<Option<usize>> {
        if let Some(&index) = self.by_dir.get(&dir) {
            return Ok(Some(index));
        }

        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            tracing::trace!(dir = %dir.display(), "no package.json, skipping");
            return Ok(None);
        }
        let manifest = PackageManifest::read(&manifest_path)?;

        let index = self.packages.len();
        self.packages.push(InstalledPackage {
            dir: dir.clone(),
            dir_name,
            manifest,
            parent,
            children: IndexMap::new(),
        });
        self.by_dir.insert(dir.clone(), index);

        for (name, child_dir) in list_modules(&dir.join(MODULES_DIR))? {
            let child_dir = canonical_dir(&child_dir)?;
            if let Some(child) = self.load_package(child_dir, name.clone(), Some(index))? {
                self.packages[index].children.insert(name, child);
            }
        }

        Ok(Some(index))
    }

    /// Node module resolution from the requiring package upwards
    fn resolve(&self, from: usize, name: &str) -> Option<usize> {
        let mut current = Some(from);
        while let Some(index) = current {
            let package = &self.packages[index];
            if let Some(&found) = package.children.get(name) {
                return Some(found);
            }
            current = package.parent;
        }
        None
    }

    fn requirements(&self, index: usize) -> Vec<Requirement> {
        let manifest = &self.packages[index].manifest;
        let runtime = manifest.runtime_dependencies();
        let mut requirements: Vec<Requirement> = runtime
            .into_iter()
            .map(|(name, range)| Requirement {
                target: self.resolve(index, &name),
                name,
                range,
                dev: false,
            })
            .collect();

        if index == 0 {
            for (name, range) in manifest.dev_dependencies() {
                if requirements.iter().any(|r| r.name == name) {
                    continue;
                }
                requirements.push(Requirement {
                    target: self.resolve(index, &name),
                    name,
                    range,
                    dev: true,
                });
            }
        }

        requirements
    }

    /// Packages reachable from the root through required edges
    fn reachable(&self, options: TreeReadOptions) -> Vec<bool> {
        let mut reachable = vec![false; self.packages.len()];
        reachable[0] = true;

        let mut queue = VecDeque::from([0]);
        while let Some(index) = queue.pop_front() {
            for requirement in self.requirements(index) {
                if requirement.dev && !options.include_dev_dependencies {
                    continue;
                }
                if let Some(target) = requirement.target {
                    if !reachable[target] {
                        reachable[target] = true;
                        queue.push_back(target);
                    }
                }
            }
        }

        reachable
    }

    /// Builds the nested tree handed to the SBOM core
    ///
    /// Each package is embedded at its first encounter in a depth-first
    /// walk over declared requirements, with the root's runtime
    /// requirements first so that required packages are never first met
    /// below an extraneous one. Packages nobody requires are then hung
    /// under the package whose `node_modules` holds them.
    fn materialize(&self, options: TreeReadOptions) -> PackageNode {
        let reachable = self.reachable(options);
        let mut slots: Vec<Vec<(String, Slot)>> = vec![Vec::new(); self.packages.len()];
        let mut claimed = HashSet::new();

        self.claim(0, &mut slots, &mut claimed);

        for index in 1..self.packages.len() {
            if claimed.contains(&index) {
                continue;
            }
            let parent = self.packages[index].parent.unwrap_or(0);
            slots[parent].push((self.packages[index].dir_name.clone(), Slot::Package(index)));
            self.claim(index, &mut slots, &mut claimed);
        }

        self.build(0, &slots, &reachable)
    }

    fn claim(
        &self,
        index: usize,
        slots: &mut [Vec<(String, Slot)>],
        claimed: &mut HashSet<usize>,
    ) {
        claimed.insert(index);

        // Runtime requirements come before the root's dev requirements
        for requirement in self.requirements(index) {
            let slot = match requirement.target {
                Some(target) if !claimed.contains(&target) => {
                    slots[index].push((requirement.name, Slot::Package(target)));
                    self.claim(target, slots, claimed);
                    continue;
                }
                Some(target) => Slot::Marker(self.display_id(target)),
                None => {
                    tracing::debug!(
                        package = %self.display_id(index),
                        dependency = %requirement.name,
                        range = %requirement.range,
                        "unmet dependency"
                    );
                    Slot::Marker(requirement.range)
                }
            };
            slots[index].push((requirement.name, slot));
        }
    }

    fn build(
        &self,
        index: usize,
        slots: &[Vec<(String, Slot)>],
        reachable: &[bool],
    ) -> PackageNode {
        let package = &self.packages[index];
        let mut node = package
            .manifest
            .to_node(&package.dir_name, package.dir.clone());
        node.extraneous = !reachable[index];

        for (key, slot) in &slots[index] {
            node = match slot {
                Slot::Package(child) => {
                    node.with_dependency(key.clone(), self.build(*child, slots, reachable))
                }
                Slot::Marker(marker) => node.with_back_reference(key.clone(), marker.clone()),
            };
        }
        node
    }

    fn display_id(&self, index: usize) -> String {
        let package = &self.packages[index];
        format!(
            "{}@{}",
            package.manifest.name().unwrap_or(&package.dir_name),
            package.manifest.version()
        )
    }
}

fn canonical_dir(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| {
        SbomError::PackageTreeReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

/// Package directories directly inside a `node_modules` folder, sorted
/// by name; scoped packages are listed as `@scope/name`
fn list_modules(modules_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !modules_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut modules = Vec::new();
    for (name, path) in list_dirs(modules_dir)? {
        if name.starts_with('@') {
            for (inner, inner_path) in list_dirs(&path)? {
                modules.push((format!("{}/{}", name, inner), inner_path));
            }
        } else {
            modules.push((name, path));
        }
    }
    Ok(modules)
}

fn list_dirs(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir).map_err(|e| SbomError::PackageTreeReadError {
        path: dir.to_path_buf(),
        details: e.to_string(),
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SbomError::PackageTreeReadError {
            path: dir.to_path_buf(),
            details: e.to_string(),
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();
        // Follows symlinks: linked packages are installed packages too
        if name.starts_with('.') || !path.is_dir() {
            continue;
        }
        dirs.push((name, path));
    }
    dirs.sort();
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::DependencyEntry;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn write_package(dir: &Path, manifest: Value) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(MANIFEST_FILE), manifest.to_string()).unwrap();
    }

    fn child<'a>(node: &'a PackageNode, key: &str) -> &'a PackageNode {
        match &node.dependencies[key] {
            DependencyEntry::Node(node) => node,
            DependencyEntry::BackReference(marker) => panic!("{} is a back-reference to {}", key, marker),
        }
    }

    fn marker<'a>(node: &'a PackageNode, key: &str) -> &'a str {
        match &node.dependencies[key] {
            DependencyEntry::BackReference(marker) => marker,
            DependencyEntry::Node(_) => panic!("{} is a node", key),
        }
    }

    #[test]
    fn test_missing_root_manifest() {
        let temp_dir = TempDir::new().unwrap();

        let err = NodeModulesReader::new()
            .read_tree(temp_dir.path(), TreeReadOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("package.json not found"));
    }

    #[test]
    fn test_declared_dependencies_resolve() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_package(root, json!({ "name": "app", "version": "1.0.0", "dependencies": { "lodash": "^4.17.0" } }));
        write_package(
            &root.join("node_modules/lodash"),
            json!({ "name": "lodash", "version": "4.17.21", "license": "MIT" }),
        );

        let tree = NodeModulesReader::new()
            .read_tree(root, TreeReadOptions::default())
            .unwrap();

        assert_eq!(tree.name, "app");
        assert!(!tree.extraneous);
        let lodash = child(&tree, "lodash");
        assert_eq!(lodash.version, "4.17.21");
        assert!(!lodash.extraneous);
        assert_eq!(
            lodash.real_path,
            root.join("node_modules/lodash").canonicalize().unwrap()
        );
    }

    #[test]
    fn test_scoped_and_nested_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_package(root, json!({ "name": "app", "dependencies": { "@scope/widget": "1.x", "dup": "2" } }));
        write_package(
            &root.join("node_modules/@scope/widget"),
            json!({ "name": "@scope/widget", "version": "1.0.0", "dependencies": { "dup": "1" } }),
        );
        write_package(
            &root.join("node_modules/@scope/widget/node_modules/dup"),
            json!({ "name": "dup", "version": "1.0.0" }),
        );
        write_package(&root.join("node_modules/dup"), json!({ "name": "dup", "version": "2.0.0" }));

        let tree = NodeModulesReader::new()
            .read_tree(root, TreeReadOptions::default())
            .unwrap();

        let widget = child(&tree, "@scope/widget");
        assert_eq!(child(widget, "dup").version, "1.0.0");
        assert_eq!(child(&tree, "dup").version, "2.0.0");
    }

    #[test]
    fn test_cycle_becomes_back_reference() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_package(root, json!({ "name": "app", "dependencies": { "a": "*" } }));
        write_package(&root.join("node_modules/a"), json!({ "name": "a", "version": "1.0.0", "dependencies": { "b": "*" } }));
        write_package(&root.join("node_modules/b"), json!({ "name": "b", "version": "1.0.0", "dependencies": { "a": "*" } }));

        let tree = NodeModulesReader::new()
            .read_tree(root, TreeReadOptions::default())
            .unwrap();

        let b = child(child(&tree, "a"), "b");
        assert_eq!(marker(b, "a"), "a@1.0.0");
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_unmet_dependency_keeps_range() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_package(root, json!({ "name": "app", "dependencies": { "missing": "^1.2.3" } }));

        let tree = NodeModulesReader::new()
            .read_tree(root, TreeReadOptions::default())
            .unwrap();

        assert_eq!(marker(&tree, "missing"), "^1.2.3");
    }

    #[test]
    fn test_dev_dependencies_are_extraneous_unless_included() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_package(
            root,
            json!({ "name": "app", "dependencies": { "shared": "*" }, "devDependencies": { "jest": "*" } }),
        );
        write_package(&root.join("node_modules/jest"), json!({ "name": "jest", "version": "29.0.0", "dependencies": { "shared": "*" } }));
        write_package(&root.join("node_modules/shared"), json!({ "name": "shared", "version": "1.0.0" }));

        let tree = NodeModulesReader::new()
            .read_tree(root, TreeReadOptions::default())
            .unwrap();
        assert!(child(&tree, "jest").extraneous);
        assert!(!child(&tree, "shared").extraneous);
        assert_eq!(marker(child(&tree, "jest"), "shared"), "shared@1.0.0");

        let tree = NodeModulesReader::new()
            .read_tree(root, TreeReadOptions { include_dev_dependencies: true })
            .unwrap();
        assert!(!child(&tree, "jest").extraneous);
    }

    #[test]
    fn test_undeclared_package_is_extraneous() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_package(root, json!({ "name": "app" }));
        write_package(&root.join("node_modules/stray"), json!({ "name": "stray", "version": "0.1.0" }));
        fs::create_dir_all(root.join("node_modules/.bin")).unwrap();
        fs::create_dir_all(root.join("node_modules/no-manifest")).unwrap();

        let tree = NodeModulesReader::new()
            .read_tree(root, TreeReadOptions::default())
            .unwrap();

        assert_eq!(tree.dependencies.len(), 1);
        assert!(child(&tree, "stray").extraneous);
    }

    #[test]
    fn test_malformed_nested_manifest_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_package(root, json!({ "name": "app" }));
        fs::create_dir_all(root.join("node_modules/broken")).unwrap();
        fs::write(root.join("node_modules/broken/package.json"), "{").unwrap();

        let result = NodeModulesReader::new().read_tree(root, TreeReadOptions::default());
        assert!(result.is_err());
    }
}
