use kube::api::ListParams;
use kube::{Api, Client};
use tracing::debug;

use crate::core::client::kube_resources::DaemonSet;
use crate::errors::Result;

/// Fetch a single daemonset by name and namespace
pub async fn fetch_daemonset(client: &Client, namespace: &str, name: &str) -> Result<DaemonSet> {
    let daemonsets: Api<DaemonSet> = Api::namespaced(client.clone(), namespace);
    let daemonset = daemonsets.get(name).await?;

    debug!("Fetched daemonset: {}/{}", namespace, name);
    Ok(daemonset)
}

/// Fetch daemonsets in a specific namespace
pub async fn fetch_daemonsets(client: &Client, namespace: &str) -> Result<Vec<DaemonSet>> {
    let daemonsets: Api<DaemonSet> = Api::namespaced(client.clone(), namespace);
    let ds_list = daemonsets.list(&ListParams::default()).await?;

    debug!(
        "Discovered {} daemonset(s) in namespace '{}'",
        ds_list.items.len(),
        namespace
    );
    Ok(ds_list.items)
}
