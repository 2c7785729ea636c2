use crate::spdx::reference::{ReferenceSet, EXCEPTIONS};

/// Check that every license referenced inside an SPDX expression is
/// recognized.
///
/// This is deliberately not a full SPDX grammar: parentheses are deleted
/// without balance checking and `AND`/`OR` only delimit atoms — the
/// boolean structure is never evaluated. The accumulated license CSV was
/// built against exactly this acceptance behavior, so the flattening must
/// stay as is.
pub fn validate(expression: &str, reference: &ReferenceSet) -> bool {
    let expression = expression.replace(['(', ')'], "");

    let mut atoms: Vec<&str> = Vec::new();
    for and_part in expression.split("AND") {
        for or_part in and_part.trim().split("OR") {
            atoms.push(or_part.trim());
        }
    }

    for atom in atoms {
        // Only the first WITH delimits the exception; anything after a
        // second WITH is folded into the exception string and compared
        // verbatim.
        let license_id = match atom.split_once("WITH") {
            Some((id, exception)) => {
                if !EXCEPTIONS.contains(&exception.trim()) {
                    return false;
                }
                id.trim()
            }
            None => atom,
        };

        if license_id == "custom" || license_id == "Public-Domain" {
            continue;
        }
        if !reference.contains(license_id) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferenceSet {
        ReferenceSet::from_ids(["MIT", "Apache-2.0", "GPL-2.0-only", "BSD-3-Clause"])
    }

    #[test]
    fn test_single_identifier() {
        assert!(validate("MIT", &reference()));
        assert!(!validate("Not-A-License", &reference()));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!validate("mit", &reference()));
    }

    #[test]
    fn test_and_or_combinations() {
        let reference = reference();
        assert!(validate("MIT AND Apache-2.0", &reference));
        assert!(validate("MIT OR Apache-2.0", &reference));
        assert!(validate("MIT OR Apache-2.0 AND GPL-2.0-only", &reference));
        assert!(!validate("MIT AND Not-A-License", &reference));
        assert!(!validate("Not-A-License OR MIT", &reference));
    }

    #[test]
    fn test_parentheses_are_stripped_not_matched() {
        let reference = reference();
        assert!(validate("(MIT OR Apache-2.0) AND BSD-3-Clause", &reference));
        // Unbalanced parens are fine; they are simply deleted.
        assert!(validate("((MIT", &reference));
    }

    #[test]
    fn test_sentinels() {
        let reference = reference();
        assert!(validate("custom", &reference));
        assert!(validate("Public-Domain", &reference));
        assert!(validate("MIT OR custom", &reference));
    }

    #[test]
    fn test_with_exception() {
        let reference = reference();
        assert!(validate("MIT WITH OpenSSL-Exception", &reference));
        assert!(validate("Apache-2.0 WITH LLVM-exception", &reference));
        assert!(!validate("MIT WITH Bogus-Exception", &reference));
        // The base license still has to be recognized.
        assert!(!validate("Not-A-License WITH LLVM-exception", &reference));
    }

    #[test]
    fn test_second_with_folds_into_exception() {
        // "LLVM-exception WITH LLVM-exception" is not a known exception.
        assert!(!validate(
            "MIT WITH LLVM-exception WITH LLVM-exception",
            &reference()
        ));
    }

    #[test]
    fn test_empty_atoms_reject() {
        let reference = reference();
        assert!(!validate("", &reference));
        assert!(!validate("MIT OR OR Apache-2.0", &reference));
        assert!(!validate("MIT AND ", &reference));
    }
}
