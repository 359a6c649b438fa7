use crate::application::dto::{SbomRequest, SbomResponse};
use crate::ports::outbound::{
    LicenseTextReader, PackageTreeReader, ProgressReporter, TreeReadOptions,
};
use crate::sbom_generation::domain::{ComponentInventory, PackageNode, SpdxLicenseTable};
use crate::sbom_generation::services::{
    ComponentNormalizer, DocumentAssembler, GraphWalker, NormalizationOptions,
};
use crate::shared::Result;

/// GenerateSbomUseCase - Core use case for SBOM generation
///
/// Orchestrates the generation workflow using generic dependency
/// injection for all infrastructure dependencies.
///
/// # Type Parameters
/// * `PTR` - PackageTreeReader implementation
/// * `LTR` - LicenseTextReader implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateSbomUseCase<PTR, LTR, PR> {
    tree_reader: PTR,
    license_reader: LTR,
    progress_reporter: PR,
    spdx_licenses: SpdxLicenseTable,
}

impl<PTR, LTR, PR> GenerateSbomUseCase<PTR, LTR, PR>
where
    PTR: PackageTreeReader,
    LTR: LicenseTextReader,
    PR: ProgressReporter,
{
    /// Creates a new GenerateSbomUseCase with injected dependencies
    pub fn new(
        tree_reader: PTR,
        license_reader: LTR,
        progress_reporter: PR,
        spdx_licenses: SpdxLicenseTable,
    ) -> Self {
        Self {
            tree_reader,
            license_reader,
            progress_reporter,
            spdx_licenses,
        }
    }

    /// Executes the SBOM generation use case
    ///
    /// # Errors
    /// Any fatal error (unreadable tree, malformed integrity data,
    /// unreadable license file) aborts the run; no partial document is
    /// returned
    pub fn execute(&self, request: SbomRequest) -> Result<SbomResponse> {
        // Step 1: Obtain the installed package tree
        let tree = self.read_package_tree(&request)?;

        // Step 2: Flatten it into components
        let inventory = self.collect_components(&tree, &request)?;

        // Step 3: Surface non-fatal problems
        self.report_diagnostics(&inventory);

        // Step 4: Assemble the document
        let (components, diagnostics) = inventory.into_parts();
        self.progress_reporter
            .report(&format!("✅ Collected {} component(s)", components.len()));
        let document = DocumentAssembler::assemble(components, request.include_serial_number);

        Ok(SbomResponse::new(document, diagnostics))
    }

    fn read_package_tree(&self, request: &SbomRequest) -> Result<PackageNode> {
        self.progress_reporter.report(&format!(
            "📖 Reading package tree from: {}",
            request.project_path.display()
        ));

        let options = TreeReadOptions {
            include_dev_dependencies: request.include_dev_dependencies,
        };
        let tree = self.tree_reader.read_tree(&request.project_path, options)?;

        self.progress_reporter.report(&format!(
            "✅ Found {} installed package(s)",
            tree.node_count().saturating_sub(1)
        ));
        Ok(tree)
    }

    fn collect_components(
        &self,
        tree: &PackageNode,
        request: &SbomRequest,
    ) -> Result<ComponentInventory> {
        let options = NormalizationOptions {
            include_license_data: request.include_license_data,
            include_license_text: request.include_license_text,
        };
        tracing::debug!(?options, spdx_ids = self.spdx_licenses.len(), "normalizing components");

        let normalizer =
            ComponentNormalizer::new(&self.spdx_licenses, &self.license_reader, options);
        GraphWalker::new(&normalizer).walk_with_progress(tree, |visited, total| {
            self.progress_reporter.report_progress(visited, total, None)
        })
    }

    fn report_diagnostics(&self, inventory: &ComponentInventory) {
        for diagnostic in inventory.diagnostics() {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: {}", diagnostic));
        }
    }
}
