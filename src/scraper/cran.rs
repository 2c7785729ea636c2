use std::collections::HashSet;
use std::path::Path;

use anyhow::Result;
use regex::Regex;

use crate::spdx::canonical::canonicalize_expression;

/// Matches the third comma-separated field of a CRAN metadata line, which
/// carries the quoted license declaration.
fn license_field_regex() -> Result<Regex> {
    Ok(Regex::new(r#"^[^,]*,[^,]*,"([^"]*)""#)?)
}

/// Extract the raw license declaration from one CRAN metadata line.
fn license_field(re: &Regex, line: &str) -> Option<String> {
    re.captures(line).map(|caps| caps[1].to_string())
}

/// Build the raw → canonical mapping for every distinct license
/// declaration in a CRAN metadata dump.
///
/// The first line is a header and is skipped. First-seen order is kept so
/// the output is stable across runs.
pub fn canonical_map(r_licenses_file: &Path) -> Result<Vec<(String, String)>> {
    let content = std::fs::read_to_string(r_licenses_file)?;
    let re = license_field_regex()?;

    let mut seen = HashSet::new();
    let mut mapping = Vec::new();

    for line in content.lines().skip(1) {
        let Some(raw) = license_field(&re, line) else {
            continue;
        };
        if !seen.insert(raw.clone()) {
            continue;
        }
        let canonical = canonicalize_expression(&raw);
        mapping.push((raw, canonical));
    }

    Ok(mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_license_field_extraction() {
        let re = license_field_regex().unwrap();
        assert_eq!(
            license_field(&re, r#""pkg","1.0","GPL (>= 2)""#),
            Some("GPL (>= 2)".to_string())
        );
        assert_eq!(license_field(&re, "not,enough"), None);
    }

    #[test]
    fn test_canonical_map_skips_header_and_dedups() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, r#""package","version","license""#).unwrap();
        writeln!(f, r#""a","1.0","GPL (>= 2)""#).unwrap();
        writeln!(f, r#""b","2.1","GPL (>= 2)""#).unwrap();
        writeln!(f, r#""c","0.3","MIT | GPL-2""#).unwrap();

        let mapping = canonical_map(f.path()).unwrap();
        assert_eq!(
            mapping,
            vec![
                ("GPL (>= 2)".to_string(), "GPL-2.0-or-later".to_string()),
                ("MIT | GPL-2".to_string(), "MIT OR GPL-2.0-only".to_string()),
            ]
        );
    }
}
