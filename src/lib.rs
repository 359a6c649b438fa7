//! npm-sbom - SBOM generation tool for npm projects
//!
//! This library turns the installed package tree of an npm project into a
//! CycloneDX 1.4 bill of materials, following hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Package tree model, license and hash
//!   normalization, graph walking
//! - **Application Layer** (`application`): Use cases, DTOs, read models and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use npm_sbom::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let tree_reader = NodeModulesReader::new();
//! let license_reader = FileSystemLicenseReader::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = GenerateSbomUseCase::new(
//!     tree_reader,
//!     license_reader,
//!     progress_reporter,
//!     SpdxLicenseTable::bundled(),
//! );
//!
//! // Execute
//! let response = use_case.execute(SbomRequest::new(PathBuf::from(".")))?;
//!
//! // Format output
//! let model = SbomReadModelBuilder::build(&response.document);
//! let output = CycloneDxXmlFormatter::new().format(&model)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemLicenseReader, FileSystemWriter, NodeModulesReader, PackageTreeFileReader,
        StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        CycloneDxJsonFormatter, CycloneDxXmlFormatter,
    };
    pub use crate::application::dto::{OutputFormat, SbomRequest, SbomResponse};
    pub use crate::application::read_models::{SbomReadModel, SbomReadModelBuilder};
    pub use crate::application::use_cases::GenerateSbomUseCase;
    pub use crate::ports::outbound::{
        LicenseTextReader, OutputPresenter, PackageTreeReader, ProgressReporter, SbomFormatter,
        TreeReadOptions,
    };
    pub use crate::sbom_generation::domain::{
        BomDocument, Component, Diagnostic, LicenseDeclaration, PackageNode, SpdxLicenseTable,
    };
    pub use crate::sbom_generation::services::{
        ComponentNormalizer, GraphWalker, LicenseResolver, NormalizationOptions,
    };
    pub use crate::shared::Result;
}
