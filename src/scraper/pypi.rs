use std::collections::HashMap;

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

use crate::spdx::reference::ReferenceSet;

const SIMPLE_INDEX_URL: &str = "https://pypi.org/simple/";
const USER_AGENT: &str = "license-collectr/0.1.0";

#[derive(Debug, Deserialize)]
struct SimpleIndex {
    projects: Vec<SimpleProject>,
}

#[derive(Debug, Deserialize)]
struct SimpleProject {
    name: String,
}

/// Fetch the PyPI package index and map UPPERCASED names onto the
/// spelling PyPI actually uses. Spack package names are case-normalized;
/// PyPI names are not.
pub async fn package_map(client: &Client) -> Result<HashMap<String, String>> {
    let index: SimpleIndex = client
        .get(SIMPLE_INDEX_URL)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/vnd.pypi.simple.v1+json")
        .send()
        .await?
        .json()
        .await?;

    Ok(index
        .projects
        .into_iter()
        .map(|project| (project.name.to_uppercase(), project.name))
        .collect())
}

/// Fetch a package's license field from the PyPI JSON API.
///
/// PyPI license fields are free text; spaces are replaced with dashes and
/// the result is accepted only when it is a recognized SPDX identifier.
/// Everything else resolves to `Ok(None)`.
pub async fn fetch_license(
    client: &Client,
    name: &str,
    reference: &ReferenceSet,
) -> Result<Option<String>> {
    let url = format!("https://pypi.org/pypi/{}/json", name);

    let response = client
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?;

    if !response.status().is_success() {
        return Ok(None);
    }

    let data: serde_json::Value = response.json().await?;
    let license = data
        .get("info")
        .and_then(|info| info.get("license"))
        .and_then(|license| license.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.replace(' ', "-"));

    Ok(license.filter(|candidate| reference.contains(candidate)))
}
