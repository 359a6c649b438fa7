use npm_sbom::prelude::*;
use std::path::Path;

/// Mock PackageTreeReader that hands out a prepared tree
pub struct MockTreeReader {
    tree: PackageNode,
}

impl MockTreeReader {
    pub fn new(tree: PackageNode) -> Self {
        Self { tree }
    }
}

impl PackageTreeReader for MockTreeReader {
    fn read_tree(&self, _project_path: &Path, _options: TreeReadOptions) -> Result<PackageNode> {
        Ok(self.tree.clone())
    }
}
