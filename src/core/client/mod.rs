// Kube-rs based Kubernetes client
pub mod cronjobs;
pub mod daemonsets;
pub mod deployments;
pub mod helm_releases;
pub mod kube_client;
pub mod kube_resources;
pub mod statefulsets;
