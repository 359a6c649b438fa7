use crate::sbom_generation::domain::{ComponentType, PackageNode};

/// Classifies a package as `framework` when its author says so in the
/// keywords, `library` otherwise
pub struct PackageTypeClassifier;

impl PackageTypeClassifier {
    pub fn classify(node: &PackageNode) -> ComponentType {
        let is_framework = node
            .keywords
            .iter()
            .flatten()
            .any(|keyword| keyword.eq_ignore_ascii_case("framework"));

        if is_framework {
            ComponentType::Framework
        } else {
            ComponentType::Library
        }
    }
}
