use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

/// Print the lint results: a one-line summary, plus a table of offending
/// records unless `quiet`.
pub fn render_lint_findings(findings: &[(String, String)], total: usize, quiet: bool) {
    if findings.is_empty() {
        println!("Total: {}  Invalid: {}", total, "0".green());
        return;
    }

    println!(
        "Total: {}  Invalid: {}",
        total,
        findings.len().to_string().red()
    );

    if quiet {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Package").add_attribute(Attribute::Bold),
            Cell::new("Invalid license").add_attribute(Attribute::Bold),
        ]);

    for (package, license) in findings {
        table.add_row(vec![Cell::new(package), Cell::new(license)]);
    }

    println!("{table}");
}
