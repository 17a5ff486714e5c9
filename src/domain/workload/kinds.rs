//! Resource kind registry: the closed set of workload kinds the controller
//! understands, and the per-kind mapping into the common [`PodWorkload`]
//! representation.
//!
//! Adding a kind means adding one enum variant, its fetcher, and its mapper;
//! nothing else changes.

use std::collections::BTreeMap;

use kube::Client;

use crate::core::client::cronjobs::{fetch_cronjob, fetch_cronjobs};
use crate::core::client::daemonsets::{fetch_daemonset, fetch_daemonsets};
use crate::core::client::deployments::{fetch_deployment, fetch_deployments};
use crate::core::client::helm_releases::{fetch_helm_release, fetch_helm_releases};
use crate::core::client::kube_resources::{
    CronJob, DaemonSet, Deployment, HelmRelease, ObjectMeta, StatefulSet,
};
use crate::core::client::statefulsets::{fetch_statefulset, fetch_statefulsets};
use crate::domain::chart::values::extract_containers;
use crate::domain::workload::model::{ContainerSource, ContainersOrExcuse, PodWorkload};
use crate::domain::workload::status::{rollout_status, WorkloadStatus};
use crate::errors::Result;

/// The fixed set of workload kinds. Read-only after compilation; safe for
/// unsynchronized concurrent use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    CronJob,
    DaemonSet,
    Deployment,
    StatefulSet,
    HelmRelease,
}

pub const RESOURCE_KINDS: [ResourceKind; 5] = [
    ResourceKind::CronJob,
    ResourceKind::DaemonSet,
    ResourceKind::Deployment,
    ResourceKind::StatefulSet,
    ResourceKind::HelmRelease,
];

impl ResourceKind {
    pub fn from_tag(tag: &str) -> Option<ResourceKind> {
        match tag {
            "cronjob" => Some(ResourceKind::CronJob),
            "daemonset" => Some(ResourceKind::DaemonSet),
            "deployment" => Some(ResourceKind::Deployment),
            "statefulset" => Some(ResourceKind::StatefulSet),
            "helmrelease" => Some(ResourceKind::HelmRelease),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ResourceKind::CronJob => "cronjob",
            ResourceKind::DaemonSet => "daemonset",
            ResourceKind::Deployment => "deployment",
            ResourceKind::StatefulSet => "statefulset",
            ResourceKind::HelmRelease => "helmrelease",
        }
    }

    /// Fetch one workload of this kind. Not-found and transport errors
    /// propagate unchanged from the cluster API.
    pub async fn workload(
        &self,
        client: &Client,
        namespace: &str,
        name: &str,
    ) -> Result<PodWorkload> {
        match self {
            ResourceKind::CronJob => {
                Ok(map_cronjob_to_workload(&fetch_cronjob(client, namespace, name).await?))
            }
            ResourceKind::DaemonSet => Ok(map_daemonset_to_workload(
                &fetch_daemonset(client, namespace, name).await?,
            )),
            ResourceKind::Deployment => Ok(map_deployment_to_workload(
                &fetch_deployment(client, namespace, name).await?,
            )),
            ResourceKind::StatefulSet => Ok(map_statefulset_to_workload(
                &fetch_statefulset(client, namespace, name).await?,
            )),
            ResourceKind::HelmRelease => Ok(map_helm_release_to_workload(
                &fetch_helm_release(client, namespace, name).await?,
            )),
        }
    }

    /// Fetch all workloads of this kind in a namespace.
    pub async fn workloads(&self, client: &Client, namespace: &str) -> Result<Vec<PodWorkload>> {
        match self {
            ResourceKind::CronJob => Ok(fetch_cronjobs(client, namespace)
                .await?
                .iter()
                .map(map_cronjob_to_workload)
                .collect()),
            ResourceKind::DaemonSet => Ok(fetch_daemonsets(client, namespace)
                .await?
                .iter()
                .map(map_daemonset_to_workload)
                .collect()),
            ResourceKind::Deployment => Ok(fetch_deployments(client, namespace)
                .await?
                .iter()
                .map(map_deployment_to_workload)
                .collect()),
            ResourceKind::StatefulSet => Ok(fetch_statefulsets(client, namespace)
                .await?
                .iter()
                .map(map_statefulset_to_workload)
                .collect()),
            ResourceKind::HelmRelease => Ok(fetch_helm_releases(client, namespace)
                .await?
                .iter()
                .map(map_helm_release_to_workload)
                .collect()),
        }
    }
}

fn meta_fields(metadata: &ObjectMeta) -> (String, String, BTreeMap<String, String>) {
    (
        metadata.name.clone().unwrap_or_default(),
        metadata.namespace.clone().unwrap_or_default(),
        metadata.labels.clone().unwrap_or_default(),
    )
}

pub(crate) fn map_deployment_to_workload(deployment: &Deployment) -> PodWorkload {
    let (name, namespace, labels) = meta_fields(&deployment.metadata);
    let status = deployment.status.as_ref();

    let workload_status = rollout_status(
        deployment.metadata.generation.unwrap_or(0),
        status.and_then(|s| s.observed_generation).unwrap_or(0),
        status.and_then(|s| s.updated_replicas).unwrap_or(0),
        deployment.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1),
    );

    PodWorkload {
        api_version: "apps/v1".to_string(),
        kind: "Deployment".to_string(),
        name,
        namespace,
        labels,
        status: workload_status,
        containers: ContainerSource::PodTemplate(
            deployment
                .spec
                .as_ref()
                .map(|s| s.template.clone())
                .unwrap_or_default(),
        ),
    }
}

pub(crate) fn map_daemonset_to_workload(daemonset: &DaemonSet) -> PodWorkload {
    let (name, namespace, labels) = meta_fields(&daemonset.metadata);
    let status = daemonset.status.as_ref();

    let workload_status = rollout_status(
        daemonset.metadata.generation.unwrap_or(0),
        status.and_then(|s| s.observed_generation).unwrap_or(0),
        status.and_then(|s| s.updated_number_scheduled).unwrap_or(0),
        status.map(|s| s.desired_number_scheduled).unwrap_or(0),
    );

    PodWorkload {
        api_version: "apps/v1".to_string(),
        kind: "DaemonSet".to_string(),
        name,
        namespace,
        labels,
        status: workload_status,
        containers: ContainerSource::PodTemplate(
            daemonset
                .spec
                .as_ref()
                .map(|s| s.template.clone())
                .unwrap_or_default(),
        ),
    }
}

pub(crate) fn map_statefulset_to_workload(statefulset: &StatefulSet) -> PodWorkload {
    let (name, namespace, labels) = meta_fields(&statefulset.metadata);
    let status = statefulset.status.as_ref();

    let workload_status = rollout_status(
        statefulset.metadata.generation.unwrap_or(0),
        status.and_then(|s| s.observed_generation).unwrap_or(0),
        status.and_then(|s| s.updated_replicas).unwrap_or(0),
        statefulset.spec.as_ref().and_then(|s| s.replicas).unwrap_or(1),
    );

    PodWorkload {
        api_version: "apps/v1".to_string(),
        kind: "StatefulSet".to_string(),
        name,
        namespace,
        labels,
        status: workload_status,
        containers: ContainerSource::PodTemplate(
            statefulset
                .spec
                .as_ref()
                .map(|s| s.template.clone())
                .unwrap_or_default(),
        ),
    }
}

/// Cronjobs have no generation/replica rollout to track; they are ready by
/// definition.
pub(crate) fn map_cronjob_to_workload(cronjob: &CronJob) -> PodWorkload {
    let (name, namespace, labels) = meta_fields(&cronjob.metadata);

    PodWorkload {
        api_version: "batch/v1".to_string(),
        kind: "CronJob".to_string(),
        name,
        namespace,
        labels,
        status: WorkloadStatus::Ready,
        containers: ContainerSource::PodTemplate(
            cronjob
                .spec
                .as_ref()
                .and_then(|s| s.job_template.spec.as_ref())
                .map(|js| js.template.clone())
                .unwrap_or_default(),
        ),
    }
}

/// Helm releases have no status computation wired in yet and always report
/// ready, whether or not the release has actually converged. Known
/// limitation.
pub(crate) fn map_helm_release_to_workload(release: &HelmRelease) -> PodWorkload {
    let (name, namespace, labels) = meta_fields(&release.metadata);

    let containers = match extract_containers(&release.spec.values, &release.spec.chart_git_path) {
        Ok(containers) => ContainersOrExcuse::Containers(containers),
        Err(err) => ContainersOrExcuse::Excuse(err.to_string()),
    };

    PodWorkload {
        api_version: "helm.integrations.caravel.dev/v1alpha1".to_string(),
        kind: "HelmRelease".to_string(),
        name,
        namespace,
        labels,
        status: WorkloadStatus::Ready,
        containers: ContainerSource::Resolved(containers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::helm_releases::HelmReleaseSpec;
    use k8s_openapi::api::apps::v1::{DeploymentSpec, DeploymentStatus};
    use k8s_openapi::api::batch::v1::{CronJobSpec, JobSpec, JobTemplateSpec};
    use serde_json::json;

    fn metadata(name: &str, generation: Option<i64>) -> ObjectMeta {
        ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("default".to_string()),
            generation,
            ..Default::default()
        }
    }

    fn deployment(
        generation: i64,
        observed: i64,
        updated: i32,
        desired: i32,
    ) -> Deployment {
        Deployment {
            metadata: metadata("web", Some(generation)),
            spec: Some(DeploymentSpec {
                replicas: Some(desired),
                ..Default::default()
            }),
            status: Some(DeploymentStatus {
                observed_generation: Some(observed),
                updated_replicas: Some(updated),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn registry_resolves_every_tag() {
        for kind in RESOURCE_KINDS {
            assert_eq!(ResourceKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(ResourceKind::from_tag("replicaset"), None);
    }

    #[test]
    fn deployment_behind_generation_is_updating() {
        let workload = map_deployment_to_workload(&deployment(5, 4, 3, 3));
        assert_eq!(workload.status, WorkloadStatus::Updating);
    }

    #[test]
    fn deployment_converged_is_ready() {
        let workload = map_deployment_to_workload(&deployment(5, 5, 3, 3));
        assert_eq!(workload.status, WorkloadStatus::Ready);
        assert_eq!(workload.kind, "Deployment");
        assert_eq!(workload.id().to_string(), "default:Deployment/web");
    }

    #[test]
    fn deployment_mid_rollout_reports_counts() {
        let workload = map_deployment_to_workload(&deployment(5, 5, 3, 5));
        assert_eq!(workload.status.to_string(), "3 out of 5 updated");
    }

    #[test]
    fn daemonset_tracks_scheduled_counts() {
        use k8s_openapi::api::apps::v1::DaemonSetStatus;
        let daemonset = DaemonSet {
            metadata: metadata("node-agent", Some(2)),
            status: Some(DaemonSetStatus {
                observed_generation: Some(2),
                updated_number_scheduled: Some(3),
                desired_number_scheduled: 5,
                ..Default::default()
            }),
            ..Default::default()
        };
        let workload = map_daemonset_to_workload(&daemonset);
        assert_eq!(workload.status.to_string(), "3 out of 5 updated");
    }

    #[test]
    fn statefulset_behind_generation_is_updating() {
        use k8s_openapi::api::apps::v1::{StatefulSetSpec, StatefulSetStatus};
        let statefulset = StatefulSet {
            metadata: metadata("db", Some(7)),
            spec: Some(StatefulSetSpec {
                replicas: Some(3),
                ..Default::default()
            }),
            status: Some(StatefulSetStatus {
                observed_generation: Some(6),
                updated_replicas: Some(3),
                ..Default::default()
            }),
        };
        let workload = map_statefulset_to_workload(&statefulset);
        assert_eq!(workload.status, WorkloadStatus::Updating);
    }

    #[test]
    fn cronjob_is_always_ready() {
        let cronjob = CronJob {
            metadata: metadata("backup", None),
            spec: Some(CronJobSpec {
                job_template: JobTemplateSpec {
                    spec: Some(JobSpec::default()),
                    ..Default::default()
                },
                ..Default::default()
            }),
            ..Default::default()
        };
        let workload = map_cronjob_to_workload(&cronjob);
        assert_eq!(workload.status, WorkloadStatus::Ready);
        assert_eq!(workload.api_version, "batch/v1");
    }

    fn helm_release(values: serde_json::Value) -> HelmRelease {
        let mut release = HelmRelease::new(
            "mariadb",
            HelmReleaseSpec {
                chart_git_path: "charts/mariadb".to_string(),
                release_name: None,
                values: values.as_object().unwrap().clone(),
            },
        );
        release.metadata.namespace = Some("default".to_string());
        release
    }

    #[test]
    fn helm_release_is_always_ready() {
        let workload = map_helm_release_to_workload(&helm_release(json!({})));
        assert_eq!(workload.status, WorkloadStatus::Ready);
    }

    #[test]
    fn helm_release_resolves_containers_through_chart_values() {
        let workload = map_helm_release_to_workload(&helm_release(json!({
            "image": {"repository": "bitnami/mariadb", "registry": "docker.io", "tag": "10.1.32"}
        })));
        let normalized = workload.normalize();
        match normalized.containers {
            ContainersOrExcuse::Containers(containers) => {
                assert_eq!(containers.len(), 1);
                assert_eq!(containers[0].name, "charts/mariadb");
                assert_eq!(containers[0].image.domain, "docker.io");
            }
            ContainersOrExcuse::Excuse(e) => panic!("unexpected excuse: {e}"),
        }
    }

    #[test]
    fn helm_release_degrades_extraction_failure_to_excuse() {
        let workload = map_helm_release_to_workload(&helm_release(json!({"image": {}})));
        let normalized = workload.normalize();
        assert_eq!(
            normalized.containers,
            ContainersOrExcuse::Excuse("malformed image reference in chart values".to_string())
        );
        // identity and status are intact despite the degraded container list
        assert_eq!(normalized.status, WorkloadStatus::Ready);
        assert_eq!(normalized.id.name, "mariadb");
    }
}
