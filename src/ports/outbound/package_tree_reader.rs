use crate::sbom_generation::domain::PackageNode;
use crate::shared::Result;
use std::path::Path;

/// Options passed to the package tree provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeReadOptions {
    /// Treat the root's development dependencies as required
    pub include_dev_dependencies: bool,
}

/// PackageTreeReader port for obtaining the installed package tree
///
/// This port abstracts where the tree comes from: an installed
/// `node_modules` directory, a JSON dump, or an in-memory fixture.
/// Implementations deliver a fully materialized tree in which every
/// package appears once as a node and later encounters are
/// back-references.
pub trait PackageTreeReader {
    /// Reads the tree rooted at the project directory
    ///
    /// # Arguments
    /// * `project_path` - Directory containing the root `package.json`
    /// * `options` - Controls which packages count as required
    ///
    /// # Errors
    /// Returns an error if the root manifest is missing or the tree
    /// cannot be read. Generation aborts without output.
    fn read_tree(&self, project_path: &Path, options: TreeReadOptions) -> Result<PackageNode>;
}

impl<T: PackageTreeReader + ?Sized> PackageTreeReader for Box<T> {
    fn read_tree(&self, project_path: &Path, options: TreeReadOptions) -> Result<PackageNode> {
        (**self).read_tree(project_path, options)
    }
}
