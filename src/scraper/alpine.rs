use std::path::Path;

use anyhow::Result;

/// The three aports repositories, in lookup order.
pub const REPOSITORIES: [&str; 3] = ["main", "community", "testing"];

/// List every package in an aports checkout as `(repository, package)`.
pub fn package_list(aports_dir: &Path) -> Result<Vec<(String, String)>> {
    let mut packages = Vec::new();
    for repository in REPOSITORIES {
        for entry in std::fs::read_dir(aports_dir.join(repository))? {
            let name = entry?.file_name().to_string_lossy().to_string();
            if name == ".rootbld-repositories" {
                continue;
            }
            packages.push((repository.to_string(), name));
        }
    }
    Ok(packages)
}

/// Find which aports repository contains a package, if any.
pub fn repository_for(aports_dir: &Path, package: &str) -> Option<&'static str> {
    REPOSITORIES
        .iter()
        .copied()
        .find(|repository| aports_dir.join(repository).join(package).exists())
}

/// Read the license declaration out of a package's APKBUILD.
///
/// Most APKBUILDs quote the value (`license="MIT"`); some omit the quotes
/// entirely, in which case the rest of the line is taken as is.
pub fn read_license(aports_dir: &Path, repository: &str, package: &str) -> Option<String> {
    let apkbuild = aports_dir
        .join(repository)
        .join(package)
        .join("APKBUILD");
    let content = std::fs::read_to_string(apkbuild).ok()?;

    for line in content.lines() {
        let Some(value) = line.strip_prefix("license=") else {
            continue;
        };
        let declaration = match value.strip_prefix('"') {
            Some(quoted) => match quoted.split_once('"') {
                Some((inner, _)) => inner,
                None => quoted,
            },
            None => value,
        };
        return Some(declaration.to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_apkbuild(dir: &Path, repository: &str, package: &str, content: &str) {
        let package_dir = dir.join(repository).join(package);
        std::fs::create_dir_all(&package_dir).unwrap();
        std::fs::write(package_dir.join("APKBUILD"), content).unwrap();
    }

    #[test]
    fn test_read_quoted_license() {
        let dir = tempfile::tempdir().unwrap();
        write_apkbuild(
            dir.path(),
            "main",
            "zlib",
            "pkgname=zlib\npkgver=1.3\nlicense=\"Zlib\"\nsource=...\n",
        );

        assert_eq!(
            read_license(dir.path(), "main", "zlib"),
            Some("Zlib".to_string())
        );
    }

    #[test]
    fn test_read_unquoted_license() {
        let dir = tempfile::tempdir().unwrap();
        write_apkbuild(dir.path(), "community", "foo", "pkgname=foo\nlicense=MIT\n");

        assert_eq!(
            read_license(dir.path(), "community", "foo"),
            Some("MIT".to_string())
        );
    }

    #[test]
    fn test_missing_declaration() {
        let dir = tempfile::tempdir().unwrap();
        write_apkbuild(dir.path(), "main", "bare", "pkgname=bare\n");

        assert_eq!(read_license(dir.path(), "main", "bare"), None);
        assert_eq!(read_license(dir.path(), "main", "no-such-package"), None);
    }

    #[test]
    fn test_repository_lookup_order() {
        let dir = tempfile::tempdir().unwrap();
        for repository in REPOSITORIES {
            std::fs::create_dir_all(dir.path().join(repository)).unwrap();
        }
        write_apkbuild(dir.path(), "testing", "newpkg", "license=\"ISC\"\n");

        assert_eq!(repository_for(dir.path(), "newpkg"), Some("testing"));
        assert_eq!(repository_for(dir.path(), "missing"), None);
    }

    #[test]
    fn test_package_list_skips_rootbld_marker() {
        let dir = tempfile::tempdir().unwrap();
        for repository in REPOSITORIES {
            std::fs::create_dir_all(dir.path().join(repository)).unwrap();
        }
        write_apkbuild(dir.path(), "main", "zlib", "license=\"Zlib\"\n");
        std::fs::create_dir_all(dir.path().join("main").join(".rootbld-repositories")).unwrap();

        let packages = package_list(dir.path()).unwrap();
        assert_eq!(packages, vec![("main".to_string(), "zlib".to_string())]);
    }
}
