//! License detection by staging a package's source tree and running an
//! external scanner over it.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use serde::Deserialize;
use tokio::process::Command;

use crate::config::DetectorConfig;

/// Minimum detector confidence for a match to be trusted.
const CONFIDENCE_THRESHOLD: f64 = 0.9;

#[derive(Debug, Deserialize)]
struct DetectedProject {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    matches: Vec<DetectedMatch>,
}

#[derive(Debug, Deserialize)]
struct DetectedMatch {
    license: String,
    confidence: f64,
}

/// Detect the license of one package, staging its source first.
///
/// Every failure mode — staging error, detector timeout, nonzero exit,
/// unparseable output, low confidence — resolves to `None`. Detection is
/// best-effort and never fails the batch.
pub async fn detect_package(config: &DetectorConfig, package: &str) -> Option<String> {
    let staged = stage_package(config, package).await?;
    let detected = detect_in_dir(config, &staged).await;

    // Staged trees are large; clean up even when detection failed.
    let _ = tokio::fs::remove_dir_all(&staged).await;

    detected
}

/// Stage the package source and return the staging directory.
async fn stage_package(config: &DetectorConfig, package: &str) -> Option<PathBuf> {
    let output = Command::new(&config.stage_command)
        .arg("stage")
        .arg(package)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output()
        .await
        .ok()?;

    if !output.status.success() {
        return None;
    }

    // The staging path is the last word of the last status line.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let path = stdout
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())?
        .split_whitespace()
        .last()?;

    Some(PathBuf::from(path))
}

/// Run the external detector over a staged source tree.
async fn detect_in_dir(config: &DetectorConfig, staged: &Path) -> Option<String> {
    let source_dir = staged.join("spack-src");

    let run = Command::new(&config.detector_command)
        .arg("-f")
        .arg("json")
        .arg(&source_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(Duration::from_secs(config.timeout_secs), run)
        .await
        .ok()?
        .ok()?;

    if !output.status.success() {
        return None;
    }

    parse_detector_output(&output.stdout)
}

/// Parse the detector's JSON report and apply the confidence threshold.
///
/// Only the first project entry is considered, and only its best match.
fn parse_detector_output(stdout: &[u8]) -> Option<String> {
    let projects: Vec<DetectedProject> = serde_json::from_slice(stdout).ok()?;
    let primary = projects.into_iter().next()?;
    if primary.error.is_some() {
        return None;
    }

    let best = primary.matches.into_iter().next()?;
    if best.confidence > CONFIDENCE_THRESHOLD {
        Some(best.license)
    } else {
        None
    }
}
