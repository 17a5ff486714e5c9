use kube::api::ListParams;
use kube::{Api, Client};
use tracing::debug;

use crate::core::client::kube_resources::Deployment;
use crate::errors::Result;

/// Fetch a single deployment by name and namespace
pub async fn fetch_deployment(
    client: &Client,
    namespace: &str,
    name: &str,
) -> Result<Deployment> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let deployment = deployments.get(name).await?;

    debug!("Fetched deployment: {}/{}", namespace, name);
    Ok(deployment)
}

/// Fetch deployments in a specific namespace
pub async fn fetch_deployments(client: &Client, namespace: &str) -> Result<Vec<Deployment>> {
    let deployments: Api<Deployment> = Api::namespaced(client.clone(), namespace);
    let deployment_list = deployments.list(&ListParams::default()).await?;

    debug!(
        "Discovered {} deployment(s) in namespace '{}'",
        deployment_list.items.len(),
        namespace
    );
    Ok(deployment_list.items)
}
