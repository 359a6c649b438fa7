use crate::shared::Result;
use anyhow::Context;
use indexmap::IndexSet;

/// Ordered set of valid SPDX license identifiers
///
/// Built once at startup and handed to the license resolver. Lookups are
/// exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpdxLicenseTable {
    ids: IndexSet<String>,
}

impl SpdxLicenseTable {
    /// Table of every license identifier known to the `spdx` crate
    pub fn bundled() -> Self {
        Self::from_ids(spdx::identifiers::LICENSES.iter().map(|license| license.0))
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a JSON array of identifiers, e.g. `["0BSD", "MIT"]`
    pub fn from_json_str(content: &str) -> Result<Self> {
        let ids: Vec<String> = serde_json::from_str(content)
            .context("SPDX license list must be a JSON array of strings")?;
        Ok(Self::from_ids(ids))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
