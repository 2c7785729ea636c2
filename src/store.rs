use std::path::Path;

use anyhow::{bail, Result};

use crate::models::{LicenseValue, PackageLicense};

/// Load the `package,license` CSV.
///
/// The load is all-or-nothing: any line that does not split into exactly
/// two comma-separated fields aborts the whole run. The license field is
/// trimmed; the package name is taken verbatim.
pub fn load_license_csv(path: &Path) -> Result<Vec<PackageLicense>> {
    let content = std::fs::read_to_string(path)?;
    let mut records = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 2 {
            bail!(
                "malformed record at {}:{}: expected `package,license`, got {:?}",
                path.display(),
                index + 1,
                line
            );
        }
        records.push(PackageLicense {
            name: fields[0].to_string(),
            license: LicenseValue::from_field(fields[1].trim()),
        });
    }

    Ok(records)
}

/// Write the CSV back out: one `package,license` line per record, no header.
pub fn write_license_csv(path: &Path, records: &[PackageLicense]) -> Result<()> {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!("{},{}\n", record.name, record.license.as_field()));
    }
    std::fs::write(path, out)?;
    Ok(())
}
