mod component_normalizer;
mod document_assembler;
mod graph_walker;
mod hash_extractor;
mod license_resolver;
mod package_type_classifier;

pub use component_normalizer::{ComponentNormalizer, NormalizationOptions, NormalizedComponent};
pub use document_assembler::{DocumentAssembler, SPEC_VERSION, TOOL_NAME};
pub use graph_walker::GraphWalker;
pub use hash_extractor::HashExtractor;
pub use license_resolver::{LicenseResolution, LicenseResolver};
pub use package_type_classifier::PackageTypeClassifier;
