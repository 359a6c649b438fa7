use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between a generated
/// document and the different ways a run can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the document was generated
    Success = 0,
    /// Application error (unreadable tree, malformed integrity data, file I/O error, etc.)
    ApplicationError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ApplicationError => write!(f, "Application Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Application-specific errors for SBOM generation.
///
/// Every variant is fatal: the run aborts and no document is emitted.
#[derive(Debug, Error)]
pub enum SbomError {
    #[error("package.json not found: {path}\n\n💡 Hint: {suggestion}")]
    PackageManifestNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse package.json: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file contains valid JSON")]
    PackageManifestParseError { path: PathBuf, details: String },

    #[error("Failed to read package tree: {path}\nDetails: {details}\n\n💡 Hint: Run `npm install` first, or pass a valid tree dump with --tree")]
    PackageTreeReadError { path: PathBuf, details: String },

    #[error("Invalid integrity value for {package}: {details}\n\n💡 Hint: Reinstall the package so that its integrity metadata is regenerated")]
    InvalidIntegrity { package: String, details: String },

    #[error("Failed to read license text: {path}\nDetails: {details}")]
    LicenseTextReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    /// Validation error for configuration and builder input
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
    }

    #[test]
    fn test_manifest_not_found_display() {
        let error = SbomError::PackageManifestNotFound {
            path: PathBuf::from("/test/project/package.json"),
            suggestion: "Test suggestion".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("package.json not found"));
        assert!(display.contains("/test/project/package.json"));
        assert!(display.contains("💡 Hint:"));
        assert!(display.contains("Test suggestion"));
    }

    #[test]
    fn test_manifest_parse_error_display() {
        let error = SbomError::PackageManifestParseError {
            path: PathBuf::from("/test/package.json"),
            details: "expected value at line 1 column 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse package.json"));
        assert!(display.contains("expected value"));
    }

    #[test]
    fn test_invalid_integrity_display() {
        let error = SbomError::InvalidIntegrity {
            package: "lodash@4.17.21".to_string(),
            details: "malformed token".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid integrity value for lodash@4.17.21"));
        assert!(display.contains("malformed token"));
    }

    #[test]
    fn test_file_write_error_display() {
        let error = SbomError::FileWriteError {
            path: PathBuf::from("/test/bom.xml"),
            details: "Permission denied".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to write to file"));
        assert!(display.contains("/test/bom.xml"));
        assert!(display.contains("Permission denied"));
    }

    #[test]
    fn test_invalid_project_path_display() {
        let error = SbomError::InvalidProjectPath {
            path: PathBuf::from("/invalid/path"),
            reason: "Directory does not exist".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid project path"));
        assert!(display.contains("Directory does not exist"));
    }

    #[test]
    fn test_security_error_display() {
        let error = SbomError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("Use a regular file instead"));
    }
}
