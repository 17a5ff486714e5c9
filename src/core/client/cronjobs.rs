use kube::api::ListParams;
use kube::{Api, Client};
use tracing::debug;

use crate::core::client::kube_resources::CronJob;
use crate::errors::Result;

/// Fetch a single cronjob by name and namespace
pub async fn fetch_cronjob(client: &Client, namespace: &str, name: &str) -> Result<CronJob> {
    let cronjobs: Api<CronJob> = Api::namespaced(client.clone(), namespace);
    let cj = cronjobs.get(name).await?;

    debug!("Fetched cronjob: {}/{}", namespace, name);
    Ok(cj)
}

/// Fetch cronjobs in a specific namespace
pub async fn fetch_cronjobs(client: &Client, namespace: &str) -> Result<Vec<CronJob>> {
    let cronjobs: Api<CronJob> = Api::namespaced(client.clone(), namespace);
    let cj_list = cronjobs.list(&ListParams::default()).await?;

    debug!(
        "Discovered {} cronjob(s) in namespace '{}'",
        cj_list.items.len(),
        namespace
    );
    Ok(cj_list.items)
}
