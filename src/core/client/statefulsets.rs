use kube::api::ListParams;
use kube::{Api, Client};
use tracing::debug;

use crate::core::client::kube_resources::StatefulSet;
use crate::errors::Result;

/// Fetch a single statefulset by name and namespace
pub async fn fetch_statefulset(
    client: &Client,
    namespace: &str,
    name: &str,
) -> Result<StatefulSet> {
    let statefulsets: Api<StatefulSet> = Api::namespaced(client.clone(), namespace);
    let statefulset = statefulsets.get(name).await?;

    debug!("Fetched statefulset: {}/{}", namespace, name);
    Ok(statefulset)
}

/// Fetch statefulsets in a specific namespace
pub async fn fetch_statefulsets(client: &Client, namespace: &str) -> Result<Vec<StatefulSet>> {
    let statefulsets: Api<StatefulSet> = Api::namespaced(client.clone(), namespace);
    let sts_list = statefulsets.list(&ListParams::default()).await?;

    debug!(
        "Discovered {} statefulset(s) in namespace '{}'",
        sts_list.items.len(),
        namespace
    );
    Ok(sts_list.items)
}
