use crate::application::read_models::SbomReadModel;
use crate::shared::Result;

/// SbomFormatter port for serializing the SBOM
///
/// This port abstracts the concrete CycloneDX encoding (XML or JSON).
pub trait SbomFormatter {
    /// Formats the SBOM read model
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &SbomReadModel) -> Result<String>;
}
