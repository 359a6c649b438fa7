mod license_file_candidates;

pub use license_file_candidates::{
    LicenseFileCandidate, LicenseFileCandidates, LICENSE_CONTENT_TYPES, LICENSE_FILE_NAMES,
};
