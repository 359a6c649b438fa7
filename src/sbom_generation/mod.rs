/// SBOM generation domain
///
/// Pure business logic: the package tree model, the component model,
/// and the services that turn one into the other.
pub mod domain;
pub mod policies;
pub mod services;
