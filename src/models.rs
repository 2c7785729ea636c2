use std::fmt;

/// A package's license assertion as stored in the license CSV.
///
/// The sentinel values are modelled as variants so internal code never
/// compares against the literal strings; the exact on-disk spellings are
/// produced only by [`LicenseValue::as_field`] and consumed only by
/// [`LicenseValue::from_field`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseValue {
    /// A candidate SPDX license expression.
    Known(String),
    /// No license assertion has been made for this package.
    Unknown,
    /// A real license that has no SPDX identifier.
    Custom,
    /// Free text the canonicalization table has no entry for.
    Unrecognized,
    /// The source detector could not determine a license.
    NoAssertion,
}

impl LicenseValue {
    /// Parse the license field of a CSV record.
    pub fn from_field(field: &str) -> LicenseValue {
        match field {
            "UNKNOWN" => LicenseValue::Unknown,
            "custom" => LicenseValue::Custom,
            "unrecognized" => LicenseValue::Unrecognized,
            "NOASSERTION" => LicenseValue::NoAssertion,
            expr => LicenseValue::Known(expr.to_string()),
        }
    }

    /// The exact string persisted in the CSV license field.
    pub fn as_field(&self) -> &str {
        match self {
            LicenseValue::Known(expr) => expr,
            LicenseValue::Unknown => "UNKNOWN",
            LicenseValue::Custom => "custom",
            LicenseValue::Unrecognized => "unrecognized",
            LicenseValue::NoAssertion => "NOASSERTION",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, LicenseValue::Unknown)
    }
}

impl fmt::Display for LicenseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_field())
    }
}

/// One `package,license` record from the persisted CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLicense {
    pub name: String,
    pub license: LicenseValue,
}

impl PackageLicense {
    /// A freshly seeded record with no license assertion yet.
    pub fn unknown(name: &str) -> PackageLicense {
        PackageLicense {
            name: name.to_string(),
            license: LicenseValue::Unknown,
        }
    }
}
