pub mod component;
pub mod component_inventory;
pub mod diagnostic;
pub mod integrity;
pub mod license_declaration;
pub mod package_node;
pub mod sbom_metadata;
pub mod spdx_table;

pub use component::{
    Component, ComponentHash, ComponentType, ExternalReference, ExternalReferenceType,
    HashAlgorithm, LicenseChoice, LicenseContentType, LicenseKind, LicenseText,
};
pub use component_inventory::ComponentInventory;
pub use diagnostic::Diagnostic;
pub use integrity::{Integrity, IntegrityError};
pub use license_declaration::{LicenseDeclaration, LicenseValue};
pub use package_node::{DependencyEntry, PackageName, PackageNode};
pub use sbom_metadata::{BomDocument, SbomMetadata};
pub use spdx_table::SpdxLicenseTable;
