//! `license-collectr` — aggregate package license metadata from several
//! ecosystems into one canonical `package,SPDX` mapping.
//!
//! # Pipeline
//! 1. `init` seeds the CSV with `UNKNOWN` rows ([`store`]).
//! 2. `alpine` / `pypi` / `cran` recover raw declarations ([`scraper`]).
//! 3. `detect` stages the remaining packages and scans their sources
//!    ([`detector`]).
//! 4. `lint` validates expressions against the SPDX list
//!    ([`spdx::validate`]) and demotes invalid records.
//! 5. `upgrade` rewrites deprecated identifiers ([`spdx::deprecated`]).
//! 6. `tag` writes the results back into package definitions ([`patcher`]).

mod cli;
mod config;
mod detector;
mod models;
mod patcher;
mod report;
mod scraper;
mod spdx;
mod store;

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, Command};
use config::{load_config, Config};
use models::{LicenseValue, PackageLicense};
use spdx::reference::ReferenceSet;

/// How many PyPI lookups are in flight at once.
const PYPI_BATCH_SIZE: usize = 75;

/// Spack prefixes Python packages with this.
const PYPI_PACKAGE_PREFIX: &str = "py-";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Init {
            package_list,
            output_file,
        } => run_init(&package_list, &output_file),
        Command::Lint {
            input_file,
            license_json,
            output_file,
        } => run_lint(&input_file, &license_json, output_file.as_deref(), cli.quiet),
        Command::Upgrade {
            input_file,
            output_file,
        } => run_upgrade(&input_file, &output_file),
        Command::Cran {
            r_licenses_file,
            output_file,
        } => run_cran(&r_licenses_file, output_file.as_deref()),
        Command::Alpine {
            input_file,
            aports_dir,
            output_file,
        } => run_alpine(&input_file, &aports_dir, &output_file, cli.quiet),
        Command::Pypi {
            input_file,
            output_file,
            license_json,
        } => run_pypi(&input_file, &output_file, &license_json, cli.quiet).await,
        Command::Detect {
            input_file,
            output_file,
        } => run_detect(&config, &input_file, &output_file, cli.quiet).await,
        Command::LintAports {
            aports_dir,
            license_json,
        } => run_lint_aports(&aports_dir, &license_json, cli.quiet),
        Command::Tag {
            spack_checkout,
            input_file,
        } => run_tag(&spack_checkout, &input_file, cli.quiet),
    }
}

fn run_init(package_list: &Path, output_file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(package_list)?;
    let records: Vec<PackageLicense> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PackageLicense::unknown)
        .collect();

    store::write_license_csv(output_file, &records)
}

fn run_lint(
    input_file: &Path,
    license_json: &Path,
    output_file: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let mut records = store::load_license_csv(input_file)?;
    let reference = ReferenceSet::load(license_json)?;

    if !quiet {
        eprintln!(
            "  {} loaded {} SPDX license ids",
            "→".cyan(),
            reference.len()
        );
    }

    let mut findings: Vec<(String, String)> = Vec::new();
    for record in &mut records {
        if record.license.is_unknown() {
            continue;
        }
        if !spdx::validate::validate(record.license.as_field(), &reference) {
            findings.push((record.name.clone(), record.license.as_field().to_string()));
            record.license = LicenseValue::Unknown;
        }
    }

    report::render_lint_findings(&findings, records.len(), quiet);

    if let Some(output_file) = output_file {
        store::write_license_csv(output_file, &records)?;
    }

    Ok(())
}

fn run_upgrade(input_file: &Path, output_file: &Path) -> Result<()> {
    let mut records = store::load_license_csv(input_file)?;
    for record in &mut records {
        let upgraded = spdx::deprecated::upgrade(record.license.as_field());
        record.license = LicenseValue::from_field(&upgraded);
    }
    store::write_license_csv(output_file, &records)
}

fn run_cran(r_licenses_file: &Path, output_file: Option<&Path>) -> Result<()> {
    let mapping = scraper::cran::canonical_map(r_licenses_file)?;

    match output_file {
        Some(path) => {
            let mut out = String::new();
            for (raw, canonical) in &mapping {
                out.push_str(&format!("{},{}\n", raw, canonical));
            }
            std::fs::write(path, out)?;
        }
        None => {
            for (raw, canonical) in &mapping {
                println!("{},{}", raw, canonical);
            }
        }
    }

    Ok(())
}

fn run_alpine(
    input_file: &Path,
    aports_dir: &Path,
    output_file: &Path,
    quiet: bool,
) -> Result<()> {
    let mut records = store::load_license_csv(input_file)?;

    let mut found = 0;
    let mut missing = 0;

    for record in &mut records {
        // Skip packages that already have license info.
        if !record.license.is_unknown() {
            continue;
        }

        let Some(repository) = scraper::alpine::repository_for(aports_dir, &record.name) else {
            missing += 1;
            continue;
        };
        match scraper::alpine::read_license(aports_dir, repository, &record.name) {
            Some(declaration) => {
                record.license = LicenseValue::from_field(&declaration);
                found += 1;
            }
            None => missing += 1,
        }
    }

    store::write_license_csv(output_file, &records)?;

    if !quiet {
        eprintln!(
            "  {} found license information for {} packages",
            "→".cyan(),
            found
        );
        eprintln!(
            "  {} no license information for {} packages",
            "→".cyan(),
            missing
        );
    }

    Ok(())
}

async fn run_pypi(
    input_file: &Path,
    output_file: &Path,
    license_json: &Path,
    quiet: bool,
) -> Result<()> {
    let mut records = store::load_license_csv(input_file)?;
    let reference = ReferenceSet::load(license_json)?;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    if !quiet {
        eprintln!("  {} fetching the PyPI package index", "→".cyan());
    }
    let package_map = scraper::pypi::package_map(&client).await?;

    // Only still-unknown Spack python packages get a lookup.
    let targets: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            record.license.is_unknown() && record.name.starts_with(PYPI_PACKAGE_PREFIX)
        })
        .map(|(index, _)| index)
        .collect();

    let pb = progress_bar(targets.len(), quiet)?;

    let mut tagged = 0;
    let mut unresolved = 0;

    for batch in targets.chunks(PYPI_BATCH_SIZE) {
        let futures: Vec<_> = batch
            .iter()
            .map(|&index| {
                let client = client.clone();
                let reference = &reference;
                let pypi_name = records[index].name[PYPI_PACKAGE_PREFIX.len()..].to_uppercase();
                let real_name = package_map.get(&pypi_name).cloned();
                async move {
                    match real_name {
                        Some(name) => scraper::pypi::fetch_license(&client, &name, reference)
                            .await
                            .ok()
                            .flatten(),
                        None => None,
                    }
                }
            })
            .collect();

        let results = join_all(futures).await;

        for (&index, result) in batch.iter().zip(results) {
            match result {
                Some(license) => {
                    records[index].license = LicenseValue::Known(license);
                    tagged += 1;
                }
                None => unresolved += 1,
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    store::write_license_csv(output_file, &records)?;

    if !quiet {
        eprintln!(
            "  {} tagged {} packages with license information",
            "→".cyan(),
            tagged
        );
        eprintln!(
            "  {} could not resolve {} python packages",
            "→".cyan(),
            unresolved
        );
    }

    Ok(())
}

async fn run_detect(
    config: &Config,
    input_file: &Path,
    output_file: &Path,
    quiet: bool,
) -> Result<()> {
    let mut records = store::load_license_csv(input_file)?;

    let pending: Vec<String> = records
        .iter()
        .filter(|record| record.license.is_unknown())
        .map(|record| record.name.clone())
        .collect();

    let pb = progress_bar(pending.len(), quiet)?;

    let mut detected: HashMap<String, String> = HashMap::new();
    let mut failed = 0;

    for batch in pending.chunks(config.detector.batch_size) {
        let futures: Vec<_> = batch
            .iter()
            .map(|name| {
                let name = name.clone();
                let detector = &config.detector;
                async move {
                    let license = detector::detect_package(detector, &name).await;
                    (name, license)
                }
            })
            .collect();

        for (name, result) in join_all(futures).await {
            match result {
                Some(license) => {
                    detected.insert(name, license);
                }
                None => failed += 1,
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    // Only the coordinator touches the records; detected identifiers go
    // through the deprecated-id upgrade before being persisted.
    for record in &mut records {
        if let Some(license) = detected.get(&record.name) {
            let upgraded = spdx::deprecated::upgrade(license);
            record.license = LicenseValue::from_field(&upgraded);
        }
    }

    store::write_license_csv(output_file, &records)?;

    if !quiet {
        eprintln!(
            "  {} found license information for {} packages",
            "→".cyan(),
            detected.len()
        );
        eprintln!(
            "  {} failed to find license information for {} packages",
            "→".cyan(),
            failed
        );
    }

    Ok(())
}

fn run_lint_aports(aports_dir: &Path, license_json: &Path, quiet: bool) -> Result<()> {
    let reference = ReferenceSet::load(license_json)?;
    let packages = scraper::alpine::package_list(aports_dir)?;

    let mut invalid = 0;
    for (repository, package) in &packages {
        let Some(declaration) = scraper::alpine::read_license(aports_dir, repository, package)
        else {
            continue;
        };
        if !spdx::validate::validate(&declaration, &reference) {
            invalid += 1;
            eprintln!(
                "  {} {}/{} has potentially invalid license {:?}",
                "⚠".yellow(),
                repository,
                package,
                declaration
            );
        }
    }

    if !quiet {
        eprintln!(
            "  {} checked {} packages, {} potentially invalid",
            "→".cyan(),
            packages.len(),
            invalid
        );
    }

    Ok(())
}

fn run_tag(spack_checkout: &Path, input_file: &Path, quiet: bool) -> Result<()> {
    let records = store::load_license_csv(input_file)?;
    let tagged = patcher::tag_packages(spack_checkout, &records)?;

    if !quiet {
        eprintln!(
            "  {} tagged {} package definitions",
            "→".cyan(),
            tagged
        );
    }

    Ok(())
}

fn progress_bar(total: usize, quiet: bool) -> Result<Option<ProgressBar>> {
    if quiet {
        return Ok(None);
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(Some(pb))
}
