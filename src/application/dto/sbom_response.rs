use crate::sbom_generation::domain::{BomDocument, Diagnostic};

/// SbomResponse - response DTO from the SBOM generation use case
#[derive(Debug, Clone)]
pub struct SbomResponse {
    /// The assembled document, ready for a formatter
    pub document: BomDocument,
    /// Non-fatal problems reported while normalizing packages
    pub diagnostics: Vec<Diagnostic>,
}

impl SbomResponse {
    pub fn new(document: BomDocument, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            document,
            diagnostics,
        }
    }

    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }
}
