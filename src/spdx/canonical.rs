//! Canonicalization of CRAN's free-text license declarations.
//!
//! The table is a closed, hand-curated correction list: keys are the
//! declarations exactly as they appear in CRAN package metadata, with no
//! case folding or whitespace collapsing before lookup. Fuzzy matching
//! would silently recategorize packages, so there is none.

/// Map one CRAN license declaration onto an SPDX identifier, `custom`, or
/// `unrecognized`.
pub fn canonicalize_one(raw: &str) -> &'static str {
    match raw {
        "GPL (>= 2)"
        | "GPL"
        | "GPL (> 2)"
        | "GPL (>= 2.0)"
        | "GNU General Public License"
        | "GNU General Public License (>= 2)" => "GPL-2.0-or-later",
        "GPL-3" | "GNU General Public License version 3" => "GPL-3.0-only",
        "MIT" | "MIT + file LICENSE" | "MIT License + file LICENSE" | "MIT + file LICENCE" => {
            "MIT"
        }
        "GPL-2" | "GPL (== 2)" => "GPL-2.0-only",
        "GPL (>= 3)"
        | "GPL (>= 3.0)"
        | "GNU General Public License (>= 3)"
        | "GPL (> 3)"
        | "GPL (>= 3.0.0)" => "GPL-3.0-or-later",
        "file LICENSE" | "file LICENCE" => "custom",
        "LGPL (>= 2)" | "LGPL" | "LGPL (>= 2.0)" | "LGPL (>= 2" => "LGPL-2.0-or-later",
        "Apache License (>= 2)" | "Apache License (>= 2.0)" => "Apache-2.0+",
        "Apache License (== 2)" | "Apache License Version 2.0" => "Apache-2.0",
        "EUPL" => "EUPL-1.2",
        "Apache License" => "Apache-1.1+",
        "CC BY-NC 4.0" => "CC-BY-NC-4.0",
        "LGPL (>= 2.1)" => "LGPL-2.1-or-later",
        "LGPL (>= 3)" | "LGPL (>= 3.0)" => "LGPL-3.0-or-later",
        "BSD_3_clause + file LICENSE"
        | "BSD 3-clause License + file LICENSE"
        | "BSD_3_clause + file LICENCE" => "BSD-3-Clause",
        "BSD_2_clause + file LICENSE"
        | "BSD 2-clause License + file LICENSE"
        | "BSD_2_clause + file LICENCE" => "BSD-2-Clause",
        "Apache License (== 2.0)" | "Apache License 2.0" => "Apache-2.0",
        "AGPL-3" | "AGPL-3 + file LICENSE" => "AGPL-3.0-only",
        "CC0" => "CC0-1.0",
        "Creative Commons Attribution 4.0 International License" | "CC BY 4.0" => "CC-BY-4.0",
        "CC BY-NC-SA 4.0" => "CC-BY-NC-SA-4.0",
        // The ACM license has no SPDX identifier and barely any users.
        "ACM" => "custom",
        // CRAN-specific distribution grant; the actual terms are unclear.
        "Unlimited" => "custom",
        "CC BY-SA 4.0" | "CC BY-SA 4.0 + file LICENSE" => "CC-BY-SA-4.0",
        "AGPL (>= 3)" => "AGPL-3.0-or-later",
        "CeCILL-2" => "CECILL-2.0",
        "CeCILL (>= 2)" => "CECILL-2.0+",
        "CECILL-2.1" => "CECILL-2.1",
        "LGPL-3" | "LGPL-3 + file LICENSE" => "LGPL-3.0-only",
        "Artistic-2.0" | "Artistic License 2.0" => "Artistic-2.0",
        "LGPL-2.1" => "LGPL-2.1-only",
        "MPL" => "MPL-1.0+",
        "BSL-1.0" | "BSL" => "BSL-1.0",
        "LGPL-2" => "LGPL-2.0-only",
        "AGPL" | "AGPL + file LICENSE" => "AGPL-1.0-or-later",
        "FreeBSD" => "BSD-2-Clause",
        "EUPL (>= 1.2)" => "EUPL-1.2+",
        // Upstream typos: no GPL 2.15.1/2.10/2.1 exists.
        "GPL (>= 2.15.1)" | "GPL (>= 2.10)" | "GPL (>= 2.1)" => "GPL-2.0-or-later",
        // Same story for these GPL-3 variants.
        "GPL (>= 3.2)" | "GPL (>= 3.3.2)" | "GPL (>= 3.5.0)" => "GPL-3.0-or-later",
        // "At most GPL 2" can only mean exactly version 2.
        "GPL (<= 2)" | "GPL (<= 2.0)" => "GPL-2.0-only",
        "Mozilla Public License 2.0" | "MPL-2.0" | "MPL (== 2.0)"
        | "Mozilla Public License Version 2.0" => "MPL-2.0",
        "CeCILL" => "CeCILL-2.0+",
        "GPL-3 + file LICENSE" => "GPL-3.0-only",
        "GNU General Public License version 2" => "GPL-2.0-only",
        "EPL" => "EPL-1.0",
        "MPL (>= 2)" | "MPL (>= 2.0)" => "MPL-2.0+",
        "EUPL-1.1" => "EUPL-1.1",
        "MPL-1.1" | "Mozilla Public License 1.1" => "MPL-1.1",
        "Common Public License Version 1.0" | "CPL-1.0" => "CPL-1.0",
        "Lucent Public License" => "LPL-1.02",
        "GNU Lesser General Public License" => "LGPL-2.1-or-later",
        // There is no CPL-2.0; assume the floor was meant.
        "CPL (>= 2)" => "CPL-1.0+",
        _ => "unrecognized",
    }
}

/// Canonicalize a full CRAN license expression.
///
/// CRAN separates alternatives with `|`; the parts are canonicalized
/// independently and rejoined with ` OR ` so the result can be fed to the
/// expression validator.
pub fn canonicalize_expression(raw: &str) -> String {
    raw.split('|')
        .map(|part| canonicalize_one(part.trim()))
        .collect::<Vec<_>>()
        .join(" OR ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_declarations() {
        assert_eq!(canonicalize_one("CC0"), "CC0-1.0");
        assert_eq!(canonicalize_one("GPL (>= 2)"), "GPL-2.0-or-later");
        assert_eq!(canonicalize_one("MIT + file LICENSE"), "MIT");
        assert_eq!(canonicalize_one("file LICENSE"), "custom");
    }

    #[test]
    fn test_unmapped_declarations() {
        assert_eq!(canonicalize_one("totally-unknown-string"), "unrecognized");
        assert_eq!(canonicalize_one(""), "unrecognized");
    }

    #[test]
    fn test_no_normalization_before_lookup() {
        // Lookup is on the raw string; near-misses stay unrecognized.
        assert_eq!(canonicalize_one("gpl (>= 2)"), "unrecognized");
        assert_eq!(canonicalize_one(" GPL (>= 2)"), "unrecognized");
    }

    #[test]
    fn test_expression_rejoins_with_or() {
        assert_eq!(canonicalize_expression("MIT | GPL-2"), "MIT OR GPL-2.0-only");
        assert_eq!(
            canonicalize_expression("GPL-2 | GPL-3 | file LICENSE"),
            "GPL-2.0-only OR GPL-3.0-only OR custom"
        );
    }

    #[test]
    fn test_expression_single_part() {
        assert_eq!(canonicalize_expression("CC0"), "CC0-1.0");
    }

    #[test]
    fn test_expression_keeps_unrecognized_parts() {
        assert_eq!(
            canonicalize_expression("MIT + file LICENSE | who knows"),
            "MIT OR unrecognized"
        );
    }
}
