use super::ComponentNormalizer;
use crate::ports::outbound::LicenseTextReader;
use crate::sbom_generation::domain::{ComponentInventory, DependencyEntry, PackageNode};
use crate::shared::Result;

/// GraphWalker service flattening a package tree into components
///
/// Depth-first, pre-order walk from the root's dependency map. The root
/// itself never becomes a component. Extraneous nodes, the root included,
/// are skipped with their whole subtree, a package already in the
/// inventory is not descended into again, and back-reference markers are never followed,
/// so every finite tree terminates even when it encodes cycles.
pub struct GraphWalker<'n, 'a, R: LicenseTextReader> {
    normalizer: &'n ComponentNormalizer<'a, R>,
}

struct WalkProgress<F> {
    visited: usize,
    total: usize,
    on_visit: F,
}

impl<'n, 'a, R: LicenseTextReader> GraphWalker<'n, 'a, R> {
    pub fn new(normalizer: &'n ComponentNormalizer<'a, R>) -> Self {
        Self { normalizer }
    }

    /// Walks the tree and returns components in first-discovery order
    ///
    /// # Errors
    /// Any normalization error aborts the walk; no partial result is
    /// returned
    pub fn walk(&self, root: &PackageNode) -> Result<ComponentInventory> {
        self.walk_with_progress(root, |_, _| {})
    }

    /// Same as [`walk`](Self::walk), calling `on_visit(visited, total)`
    /// for every non-root node reached
    pub fn walk_with_progress<F>(
        &self,
        root: &PackageNode,
        on_visit: F,
    ) -> Result<ComponentInventory>
    where
        F: FnMut(usize, usize),
    {
        let mut inventory = ComponentInventory::new();
        let mut progress = WalkProgress {
            visited: 0,
            total: root.node_count().saturating_sub(1),
            on_visit,
        };

        if root.extraneous {
            tracing::debug!(package = %root.display_id(), "root is extraneous, nothing to walk");
            return Ok(inventory);
        }

        self.descend(root, &mut inventory, &mut progress)?;

        tracing::debug!(
            components = inventory.len(),
            diagnostics = inventory.diagnostics().len(),
            "package tree walked"
        );
        Ok(inventory)
    }

    fn descend<F>(
        &self,
        node: &PackageNode,
        inventory: &mut ComponentInventory,
        progress: &mut WalkProgress<F>,
    ) -> Result<()>
    where
        F: FnMut(usize, usize),
    {
        for (key, entry) in &node.dependencies {
            match entry {
                DependencyEntry::Node(child) => self.visit(child, inventory, progress)?,
                DependencyEntry::BackReference(marker) => {
                    tracing::trace!(dependency = %key, marker = %marker, "skipping back-reference");
                }
            }
        }
        Ok(())
    }

    fn visit<F>(
        &self,
        node: &PackageNode,
        inventory: &mut ComponentInventory,
        progress: &mut WalkProgress<F>,
    ) -> Result<()>
    where
        F: FnMut(usize, usize),
    {
        progress.visited += 1;
        (progress.on_visit)(progress.visited, progress.total);

        if node.extraneous {
            tracing::debug!(package = %node.display_id(), "skipping extraneous package");
            return Ok(());
        }

        // Every copy is normalized so its errors and warnings surface even
        // when the component itself is discarded
        let normalized = self.normalizer.normalize(node)?;
        inventory.record(normalized.diagnostics);
        if !inventory.insert(normalized.component) {
            tracing::trace!(package = %node.display_id(), "skipping duplicate package");
            return Ok(());
        }

        self.descend(node, inventory, progress)
    }
}
