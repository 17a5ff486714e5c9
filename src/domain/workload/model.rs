//! The normalized workload representation handed to the reconciliation loop.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::client::kube_resources::PodTemplateSpec;
use crate::domain::workload::status::WorkloadStatus;
use crate::domain::workload::template;
use crate::image::ImageRef;

/// Identity of exactly one cluster object. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadId {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub namespace: String,
}

impl fmt::Display for WorkloadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.namespace, self.kind, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    pub image: ImageRef,
}

/// Either the complete, successfully parsed container list, or a single
/// diagnostic explaining why no list could be produced for the workload.
/// Partial lists are never surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainersOrExcuse {
    Containers(Vec<Container>),
    Excuse(String),
}

/// The externally visible projection of one workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    pub id: WorkloadId,
    pub status: WorkloadStatus,
    pub containers: ContainersOrExcuse,
}

/// Where a workload's containers come from.
///
/// Standard kinds carry a typed pod template that still needs projecting;
/// the helm-release kind has already been through the chart heuristics by the
/// time it reaches normalization.
#[derive(Debug, Clone)]
pub enum ContainerSource {
    PodTemplate(PodTemplateSpec),
    Resolved(ContainersOrExcuse),
}

/// Common intermediate representation produced by every kind adapter,
/// before container projection.
#[derive(Debug, Clone)]
pub struct PodWorkload {
    pub api_version: String,
    pub kind: String,
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub status: WorkloadStatus,
    pub containers: ContainerSource,
}

impl PodWorkload {
    pub fn id(&self) -> WorkloadId {
        WorkloadId {
            api_version: self.api_version.clone(),
            kind: self.kind.clone(),
            name: self.name.clone(),
            namespace: self.namespace.clone(),
        }
    }

    /// Assemble the final workload view: identity, status, and an
    /// all-or-nothing container list.
    pub fn normalize(self) -> Workload {
        let id = self.id();
        let containers = match self.containers {
            ContainerSource::PodTemplate(ref tpl) => template::project(tpl),
            ContainerSource::Resolved(containers) => containers,
        };
        Workload {
            id,
            status: self.status,
            containers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{Container as K8sContainer, PodSpec};

    fn pod_template(images: &[(&str, &str)]) -> PodTemplateSpec {
        PodTemplateSpec {
            spec: Some(PodSpec {
                containers: images
                    .iter()
                    .map(|(name, image)| K8sContainer {
                        name: name.to_string(),
                        image: Some(image.to_string()),
                        ..Default::default()
                    })
                    .collect(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn workload(containers: ContainerSource) -> PodWorkload {
        PodWorkload {
            api_version: "apps/v1".to_string(),
            kind: "Deployment".to_string(),
            name: "web".to_string(),
            namespace: "default".to_string(),
            labels: BTreeMap::new(),
            status: WorkloadStatus::Ready,
            containers,
        }
    }

    #[test]
    fn id_display() {
        let id = workload(ContainerSource::Resolved(ContainersOrExcuse::Containers(
            vec![],
        )))
        .id();
        assert_eq!(id.to_string(), "default:Deployment/web");
    }

    #[test]
    fn normalize_projects_pod_template() {
        let tpl = pod_template(&[("web", "nginx:1.21"), ("sidecar", "envoyproxy/envoy")]);
        let normalized = workload(ContainerSource::PodTemplate(tpl)).normalize();

        match normalized.containers {
            ContainersOrExcuse::Containers(containers) => {
                assert_eq!(containers.len(), 2);
                assert_eq!(containers[0].name, "web");
                assert_eq!(containers[0].image.tag, "1.21");
                assert_eq!(containers[1].image.image, "envoyproxy/envoy");
            }
            ContainersOrExcuse::Excuse(e) => panic!("unexpected excuse: {e}"),
        }
    }

    #[test]
    fn normalize_passes_through_resolved_containers() {
        let resolved = ContainersOrExcuse::Excuse("no dice".to_string());
        let normalized = workload(ContainerSource::Resolved(resolved.clone())).normalize();
        assert_eq!(normalized.containers, resolved);
        // identity and status survive a degraded container list
        assert_eq!(normalized.status, WorkloadStatus::Ready);
        assert_eq!(normalized.id.name, "web");
    }
}
