/// Prefix the SPDX license list attaches to deprecated identifiers.
const DEPRECATED_PREFIX: &str = "deprecated_";

/// Upgrade a deprecated SPDX identifier to its current replacement.
///
/// Identifiers without the deprecated prefix pass through unchanged, so
/// the function is idempotent on already-upgraded values. A deprecated
/// identifier with no registered replacement collapses to `UNKNOWN`; the
/// original value is discarded.
pub fn upgrade(id: &str) -> String {
    let Some(suffix) = id.strip_prefix(DEPRECATED_PREFIX) else {
        return id.to_string();
    };
    replacement_for(suffix).unwrap_or("UNKNOWN").to_string()
}

fn replacement_for(suffix: &str) -> Option<&'static str> {
    let replacement = match suffix {
        "AGPL-1.0" => "AGPL-1.0-only",
        "AGPL-3.0" => "AGPL-3.0-only",
        "GFDL-1.1" => "GFDL-1.1-only",
        "GFDL-1.2" => "GFDL-1.2-only",
        "GFDL-1.3" => "GFDL-1.3-only",
        "GPL-1.0" => "GPL-1.0-only",
        "GPL-1.0+" => "GPL-1.0-or-later",
        "GPL-2.0" => "GPL-2.0-only",
        "GPL-2.0+" => "GPL-2.0-or-later",
        "GPL-3.0" => "GPL-3.0-only",
        "GPL-3.0+" => "GPL-3.0-or-later",
        "LGPL-2.0" => "LGPL-2.0-only",
        "LGPL-2.0+" => "LGPL-2.0-or-later",
        "LGPL-2.1" => "LGPL-2.1-only",
        "LGPL-2.1+" => "LGPL-2.1-or-later",
        "LGPL-3.0" => "LGPL-3.0-only",
        "LGPL-3.0+" => "LGPL-3.0-or-later",
        "BSD-2-Clause-FreeBSD" => "BSD-2-Clause",
        "BSD-2-Clause-NetBSD" => "BSD-2-Clause",
        "StandardML-NJ" => "SMLNJ",
        _ => return None,
    };
    Some(replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrades_deprecated_ids() {
        assert_eq!(upgrade("deprecated_AGPL-3.0"), "AGPL-3.0-only");
        assert_eq!(upgrade("deprecated_GPL-3.0+"), "GPL-3.0-or-later");
        assert_eq!(upgrade("deprecated_LGPL-2.1"), "LGPL-2.1-only");
        assert_eq!(upgrade("deprecated_BSD-2-Clause-NetBSD"), "BSD-2-Clause");
    }

    #[test]
    fn test_unmapped_deprecated_id_becomes_unknown() {
        assert_eq!(upgrade("deprecated_Not-A-Real-Id"), "UNKNOWN");
        assert_eq!(upgrade("deprecated_"), "UNKNOWN");
    }

    #[test]
    fn test_non_deprecated_ids_pass_through() {
        assert_eq!(upgrade("MIT"), "MIT");
        assert_eq!(upgrade("UNKNOWN"), "UNKNOWN");
        assert_eq!(upgrade("GPL-3.0-or-later"), "GPL-3.0-or-later");
    }

    #[test]
    fn test_idempotent_after_first_upgrade() {
        for id in ["deprecated_AGPL-3.0", "deprecated_GPL-2.0+", "deprecated_Bogus", "MIT"] {
            let once = upgrade(id);
            assert_eq!(upgrade(&once), once);
        }
    }
}
