/// Re-export commonly used Kubernetes resource types from k8s-openapi
/// This module provides a centralized place for all K8s resource types

pub use k8s_openapi::api::core::v1::PodTemplateSpec;

pub use k8s_openapi::api::apps::v1::{
    DaemonSet,
    Deployment,
    StatefulSet,
};

pub use k8s_openapi::api::batch::v1::CronJob;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

pub use crate::core::client::helm_releases::HelmRelease;
