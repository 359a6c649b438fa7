use super::HashAlgorithm;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use thiserror::Error;

/// Standard alphabet, trailing `=` optional
const DIGEST_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("invalid base64 digest for {algorithm}: {details}")]
    InvalidDigest {
        algorithm: &'static str,
        details: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct IntegrityEntry {
    algorithm: HashAlgorithm,
    digest: Vec<u8>,
}

/// Parsed Subresource Integrity value
///
/// Only the algorithms usable as component hashes are retained; tokens for
/// other algorithms, and tokens not shaped like `<algorithm>-<digest>`,
/// are ignored. Entries keep token order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Integrity {
    entries: Vec<IntegrityEntry>,
}

impl Integrity {
    pub fn parse(value: &str) -> Result<Self, IntegrityError> {
        let mut entries = Vec::new();

        for token in value.split_whitespace() {
            let Some((algorithm, digest)) = split_token(token) else {
                tracing::debug!(token, "ignoring malformed integrity token");
                continue;
            };
            let Some(algorithm) = HashAlgorithm::from_sri_name(algorithm) else {
                continue;
            };

            let digest = DIGEST_ENGINE
                .decode(digest)
                .map_err(|e| IntegrityError::InvalidDigest {
                    algorithm: algorithm.sri_name(),
                    details: e.to_string(),
                })?;

            entries.push(IntegrityEntry { algorithm, digest });
        }

        Ok(Self { entries })
    }

    /// First digest recorded for the algorithm
    pub fn digest(&self, algorithm: HashAlgorithm) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|entry| entry.algorithm == algorithm)
            .map(|entry| entry.digest.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `<algorithm>-<digest>[?options]` with a lowercase alphanumeric algorithm
fn split_token(token: &str) -> Option<(&str, &str)> {
    let (algorithm, rest) = token.split_once('-')?;
    // Options follow the digest after '?'
    let digest = rest.split('?').next().unwrap_or_default();

    let well_formed = !algorithm.is_empty()
        && algorithm
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && !digest.is_empty();
    well_formed.then_some((algorithm, digest))
}
