use crate::ports::outbound::LicenseTextReader;
use crate::sbom_generation::domain::{
    Diagnostic, LicenseChoice, LicenseKind, LicenseText, LicenseValue, PackageNode,
    SpdxLicenseTable,
};
use crate::sbom_generation::policies::LicenseFileCandidates;
use crate::shared::Result;
use std::path::Path;

/// Outcome of resolving one package's license field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LicenseResolution {
    /// `None` when the package declares no license at all
    pub licenses: Option<Vec<LicenseChoice>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// LicenseResolver service for classifying declared licenses
///
/// Each declared value becomes an SPDX `id` when it exactly matches an
/// entry of the identifier table and a free-text `name` otherwise.
/// Entries that are not strings are dropped with a diagnostic. License
/// texts are looked up next to the package when enabled.
pub struct LicenseResolver<'a, R: LicenseTextReader> {
    spdx: &'a SpdxLicenseTable,
    reader: &'a R,
    include_text: bool,
}

impl<'a, R: LicenseTextReader> LicenseResolver<'a, R> {
    pub fn new(spdx: &'a SpdxLicenseTable, reader: &'a R, include_text: bool) -> Self {
        Self {
            spdx,
            reader,
            include_text,
        }
    }

    /// Resolves the license declaration of a package
    ///
    /// # Errors
    /// Returns an error if a license file exists but cannot be read
    pub fn resolve(&self, node: &PackageNode) -> Result<LicenseResolution> {
        if node.license.is_absent() {
            return Ok(LicenseResolution::default());
        }

        let mut licenses = Vec::new();
        let mut diagnostics = Vec::new();

        for value in node.license.values() {
            let license = match value {
                LicenseValue::Text(license) => license,
                LicenseValue::Invalid(entry) => {
                    tracing::debug!(
                        package = %node.display_id(),
                        entry = %entry,
                        "dropping license entry"
                    );
                    diagnostics.push(Diagnostic::InvalidLicense {
                        package: node.name.clone(),
                        version: node.version.clone(),
                        entry: entry.clone(),
                    });
                    continue;
                }
            };

            let kind = if self.spdx.contains(license) {
                LicenseKind::Id(license.clone())
            } else {
                LicenseKind::Name(license.clone())
            };

            let text = if self.include_text {
                self.find_license_text(&node.real_path, license)?
            } else {
                None
            };

            licenses.push(LicenseChoice::new(kind, text));
        }

        Ok(LicenseResolution {
            licenses: Some(licenses),
            diagnostics,
        })
    }

    /// Probes the candidate files in priority order and reads the first
    /// one that exists
    ///
    /// An empty file ends the search without attaching text. Packages
    /// without a known directory are not probed.
    pub fn find_license_text(
        &self,
        package_dir: &Path,
        license: &str,
    ) -> Result<Option<LicenseText>> {
        if package_dir.as_os_str().is_empty() {
            return Ok(None);
        }

        for candidate in LicenseFileCandidates::for_license(license) {
            let path = package_dir.join(&candidate.file_name);
            if !self.reader.exists(&path) {
                continue;
            }

            tracing::trace!(path = %path.display(), "found license file");
            let content = self.reader.read_text(&path)?;
            if content.is_empty() {
                return Ok(None);
            }
            return Ok(Some(LicenseText::new(content, candidate.content_type)));
        }

        Ok(None)
    }
}
