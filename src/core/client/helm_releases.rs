use kube::api::ListParams;
use kube::{Api, Client, CustomResource};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Result;

/// Chart-based release resource managed by the controller.
///
/// The `values` block is deliberately schemaless: it is whatever the chart
/// expects, and no two charts agree on its shape. It is carried verbatim as
/// untyped JSON and picked apart by the image heuristics in
/// `domain::chart::values`.
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize)]
#[kube(
    group = "helm.integrations.caravel.dev",
    version = "v1alpha1",
    kind = "HelmRelease",
    namespaced,
    schema = "disabled"
)]
#[serde(rename_all = "camelCase")]
pub struct HelmReleaseSpec {
    /// Path of the chart within the charts repository.
    #[serde(default)]
    pub chart_git_path: String,

    /// Release name override; defaults to the resource name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_name: Option<String>,

    /// Untyped chart configuration tree.
    #[serde(default)]
    pub values: serde_json::Map<String, serde_json::Value>,
}

/// Fetch a single helm release by name and namespace
pub async fn fetch_helm_release(
    client: &Client,
    namespace: &str,
    name: &str,
) -> Result<HelmRelease> {
    let releases: Api<HelmRelease> = Api::namespaced(client.clone(), namespace);
    let release = releases.get(name).await?;

    debug!("Fetched helm release: {}/{}", namespace, name);
    Ok(release)
}

/// Fetch helm releases in a specific namespace
pub async fn fetch_helm_releases(client: &Client, namespace: &str) -> Result<Vec<HelmRelease>> {
    let releases: Api<HelmRelease> = Api::namespaced(client.clone(), namespace);
    let release_list = releases.list(&ListParams::default()).await?;

    debug!(
        "Discovered {} helm release(s) in namespace '{}'",
        release_list.items.len(),
        namespace
    );
    Ok(release_list.items)
}
