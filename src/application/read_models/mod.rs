//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of domain data for the formatters.

pub mod component_view;
pub mod sbom_read_model;
pub mod sbom_read_model_builder;

pub use component_view::{
    ComponentView, ExternalReferenceView, HashView, LicenseTextView, LicenseView,
};
pub use sbom_read_model::{SbomMetadataView, SbomReadModel};
pub use sbom_read_model_builder::SbomReadModelBuilder;
