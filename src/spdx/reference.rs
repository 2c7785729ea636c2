use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// SPDX exception identifiers accepted after a `WITH` clause.
///
/// A fixed property of the pipeline, not read from `licenses.json`.
pub const EXCEPTIONS: [&str; 2] = ["OpenSSL-Exception", "LLVM-exception"];

/// The set of recognized SPDX license identifiers, loaded once per run
/// from the SPDX license-list JSON document. Membership is exact and
/// case-sensitive.
#[derive(Debug)]
pub struct ReferenceSet {
    ids: HashSet<String>,
}

#[derive(Debug, Deserialize)]
struct LicenseList {
    licenses: Vec<LicenseRecord>,
}

#[derive(Debug, Deserialize)]
struct LicenseRecord {
    #[serde(rename = "licenseId")]
    license_id: String,
}

impl ReferenceSet {
    /// Load the license list from an SPDX `licenses.json` document. Only
    /// the `licenseId` field of each record is used.
    pub fn load(path: &Path) -> Result<ReferenceSet> {
        let content = std::fs::read_to_string(path)?;
        let list: LicenseList = serde_json::from_str(&content)?;
        Ok(ReferenceSet {
            ids: list.licenses.into_iter().map(|l| l.license_id).collect(),
        })
    }

    /// Build a set directly from identifiers.
    pub fn from_ids<I, S>(ids: I) -> ReferenceSet
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ReferenceSet {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}
