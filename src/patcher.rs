//! Insert collected license declarations into Spack package definitions.

use std::path::Path;

use anyhow::Result;

use crate::models::PackageLicense;

/// Directives that make up the metadata block of a Spack package
/// definition. The license declaration goes after the last block of these.
const DIRECTIVES: [&str; 12] = [
    "version(",
    "conflicts(",
    "depends_on(",
    "extends(",
    "maintainers(",
    "license(",
    "provides(",
    "patch(",
    "variant(",
    "resource(",
    "build_system(",
    "requires(",
];

/// Insert a `license("...")` directive into a package definition.
///
/// The scan finds the blank line ending the last run of directive lines
/// and places the declaration just after it, followed by a blank line.
/// When the last directive block runs to the end of the file, the
/// declaration is appended instead.
pub fn insert_license_directive(content: &str, license: &str) -> String {
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();

    let mut line_index = 0;
    let mut insert_index = 0;
    while line_index < lines.len() {
        if is_directive_line(&lines[line_index]) {
            while line_index < lines.len() && !lines[line_index].trim().is_empty() {
                line_index += 1;
            }
            insert_index = line_index;
        }
        line_index += 1;
    }

    let directive = format!("    license(\"{}\")", license);
    if insert_index == lines.len() {
        lines.push(String::new());
        lines.push(directive);
    } else {
        lines.insert(insert_index + 1, directive);
        lines.insert(insert_index + 2, String::new());
    }

    lines.join("\n") + "\n"
}

fn is_directive_line(line: &str) -> bool {
    let line = line.trim_start();
    DIRECTIVES.iter().any(|directive| line.starts_with(directive))
}

/// Apply the collected licenses to every package definition in a Spack
/// checkout. Records still marked `UNKNOWN` are skipped; a missing
/// package definition is a fatal error.
pub fn tag_packages(spack_checkout: &Path, records: &[PackageLicense]) -> Result<usize> {
    let packages_dir = spack_checkout.join("var/spack/repos/builtin/packages");
    let mut tagged = 0;

    for record in records {
        if record.license.is_unknown() {
            continue;
        }

        let package_file = packages_dir.join(&record.name).join("package.py");
        let content = std::fs::read_to_string(&package_file)?;
        let patched = insert_license_directive(&content, record.license.as_field());
        std::fs::write(&package_file, patched)?;
        tagged += 1;
    }

    Ok(tagged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LicenseValue;

    #[test]
    fn test_insert_after_last_directive_block() {
        let content = "\
class Zlib(Package):
    homepage = \"https://zlib.net\"

    version(\"1.3\", sha256=\"abc\")
    version(\"1.2.13\", sha256=\"def\")

    depends_on(\"cmake\", type=\"build\")

    def install(self, spec, prefix):
        pass
";
        let patched = insert_license_directive(content, "Zlib");
        let expected = "\
class Zlib(Package):
    homepage = \"https://zlib.net\"

    version(\"1.3\", sha256=\"abc\")
    version(\"1.2.13\", sha256=\"def\")

    depends_on(\"cmake\", type=\"build\")

    license(\"Zlib\")

    def install(self, spec, prefix):
        pass
";
        assert_eq!(patched, expected);
    }

    #[test]
    fn test_append_when_directives_end_the_file() {
        let content = "\
class Tiny(Package):
    version(\"1.0\", sha256=\"abc\")";
        let patched = insert_license_directive(content, "MIT");
        let expected = "\
class Tiny(Package):
    version(\"1.0\", sha256=\"abc\")

    license(\"MIT\")
";
        assert_eq!(patched, expected);
    }

    #[test]
    fn test_tag_packages_skips_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let pkg_dir = dir.path().join("var/spack/repos/builtin/packages/zlib");
        std::fs::create_dir_all(&pkg_dir).unwrap();
        std::fs::write(
            pkg_dir.join("package.py"),
            "class Zlib(Package):\n    version(\"1.3\")\n\n    pass\n",
        )
        .unwrap();

        let records = vec![
            PackageLicense {
                name: "zlib".to_string(),
                license: LicenseValue::Known("Zlib".to_string()),
            },
            PackageLicense::unknown("never-touched"),
        ];

        let tagged = tag_packages(dir.path(), &records).unwrap();
        assert_eq!(tagged, 1);

        let patched = std::fs::read_to_string(pkg_dir.join("package.py")).unwrap();
        assert!(patched.contains("    license(\"Zlib\")"));
    }
}
