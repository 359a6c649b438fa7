use crate::sbom_generation::domain::{ComponentHash, HashAlgorithm, Integrity, PackageNode};
use crate::shared::error::SbomError;
use crate::shared::Result;

/// HashExtractor service for deriving component hashes
///
/// A legacy `shasum` wins over the integrity string when both are present.
/// Integrity digests are emitted strongest first as lowercase hex.
pub struct HashExtractor;

impl HashExtractor {
    pub fn extract(node: &PackageNode) -> Result<Vec<ComponentHash>> {
        if let Some(shasum) = non_blank(node.shasum.as_deref()) {
            return Ok(vec![ComponentHash::new(
                HashAlgorithm::Sha1,
                shasum.to_string(),
            )]);
        }

        let Some(integrity) = non_blank(node.integrity.as_deref()) else {
            return Ok(Vec::new());
        };

        let integrity = Integrity::parse(integrity).map_err(|e| SbomError::InvalidIntegrity {
            package: node.display_id(),
            details: e.to_string(),
        })?;

        Ok(HashAlgorithm::STRONGEST_FIRST
            .into_iter()
            .filter_map(|algorithm| {
                integrity
                    .digest(algorithm)
                    .map(|digest| ComponentHash::new(algorithm, hex::encode(digest)))
            })
            .collect())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
