use crate::sbom_generation::domain::LicenseContentType;

/// Conventional base names of license files, in probing order
pub const LICENSE_FILE_NAMES: [&str; 9] = [
    "LICENSE", "License", "license", "LICENCE", "Licence", "licence", "NOTICE", "Notice",
    "notice",
];

/// Content types in probing order; each carries its file extension
pub const LICENSE_CONTENT_TYPES: [LicenseContentType; 4] = [
    LicenseContentType::Plain,
    LicenseContentType::Txt,
    LicenseContentType::Markdown,
    LicenseContentType::Xml,
];

/// A file name to probe inside a package directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseFileCandidate {
    pub file_name: String,
    pub content_type: LicenseContentType,
}

/// LicenseFileCandidates policy: where license texts are looked for
///
/// Candidates are ordered license-specific suffix first (`LICENSE.MIT`),
/// then generic (`LICENSE`); within each, by base name and then by
/// content type. The first existing file wins.
pub struct LicenseFileCandidates;

impl LicenseFileCandidates {
    /// Ordered candidate list for one declared license value
    ///
    /// License values containing path separators only get the generic
    /// candidates, so probing never leaves the package directory.
    pub fn for_license(license: &str) -> Vec<LicenseFileCandidate> {
        let mut suffixes = Vec::with_capacity(2);
        if !license.contains(['/', '\\']) {
            suffixes.push(format!(".{}", license));
        }
        suffixes.push(String::new());

        suffixes
            .iter()
            .flat_map(|suffix| {
                LICENSE_FILE_NAMES.iter().flat_map(move |base| {
                    LICENSE_CONTENT_TYPES
                        .iter()
                        .map(move |content_type| LicenseFileCandidate {
                            file_name: format!("{}{}{}", base, suffix, content_type.extension()),
                            content_type: *content_type,
                        })
                })
            })
            .collect()
    }
}
