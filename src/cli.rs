use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "license-collectr",
    about = "Collect package license metadata and canonicalize it into SPDX form",
    version
)]
pub struct Cli {
    /// Config file [default: ./.license-collectr/config.toml, fallback ~/.config/license-collectr/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Only print summary lines
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed a license CSV with one UNKNOWN row per package
    Init {
        /// Newline-delimited package name list
        #[arg(long)]
        package_list: PathBuf,
        /// Where to write the seeded CSV
        #[arg(long)]
        output_file: PathBuf,
    },

    /// Validate every license expression in a CSV against the SPDX list
    Lint {
        /// The license CSV to lint
        #[arg(long)]
        input_file: PathBuf,
        /// SPDX license-list JSON document
        #[arg(long, default_value = "licenses.json")]
        license_json: PathBuf,
        /// Optional output CSV with invalid records demoted to UNKNOWN
        #[arg(long)]
        output_file: Option<PathBuf>,
    },

    /// Upgrade deprecated SPDX identifiers across a CSV
    Upgrade {
        #[arg(long)]
        input_file: PathBuf,
        #[arg(long)]
        output_file: PathBuf,
    },

    /// Canonicalize CRAN free-text license declarations
    Cran {
        /// CRAN package metadata dump
        #[arg(long)]
        r_licenses_file: PathBuf,
        /// Where to write the raw,canonical mapping (stdout when omitted)
        #[arg(long)]
        output_file: Option<PathBuf>,
    },

    /// Fill UNKNOWN entries from Alpine aports APKBUILD declarations
    Alpine {
        #[arg(long)]
        input_file: PathBuf,
        /// Path to an aports checkout
        #[arg(long)]
        aports_dir: PathBuf,
        #[arg(long)]
        output_file: PathBuf,
    },

    /// Fill UNKNOWN py-* entries from the PyPI JSON API
    Pypi {
        #[arg(long)]
        input_file: PathBuf,
        #[arg(long)]
        output_file: PathBuf,
        /// SPDX license-list JSON document
        #[arg(long, default_value = "licenses.json")]
        license_json: PathBuf,
    },

    /// Detect licenses by staging sources and scanning them
    Detect {
        #[arg(long)]
        input_file: PathBuf,
        #[arg(long)]
        output_file: PathBuf,
    },

    /// Validate the license declarations inside an aports checkout
    LintAports {
        /// Path to an aports checkout
        #[arg(long)]
        aports_dir: PathBuf,
        /// SPDX license-list JSON document
        #[arg(long, default_value = "licenses.json")]
        license_json: PathBuf,
    },

    /// Insert collected licenses into Spack package definitions
    Tag {
        /// Path to a Spack checkout
        #[arg(long)]
        spack_checkout: PathBuf,
        #[arg(long)]
        input_file: PathBuf,
    },
}
