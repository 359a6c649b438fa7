use serde_json::Value;

/// Non-fatal problem found while normalizing a package
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A license entry that is not a string after unwrapping; the entry is dropped
    InvalidLicense {
        package: String,
        version: String,
        entry: Value,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::InvalidLicense {
                package, version, ..
            } => write!(
                f,
                "Invalid license definition in package: {}:{}. Skipping",
                package, version
            ),
        }
    }
}
