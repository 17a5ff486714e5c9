//! Workload abstraction layer for the caravel continuous-delivery controller.
//!
//! Normalizes the cluster's heterogeneous workload kinds (cronjobs,
//! daemonsets, deployments, statefulsets and chart-based helm releases) into
//! one uniform view: a readiness status plus the list of container images
//! currently declared for the workload. The reconciliation loop consumes this
//! view to decide whether a release has converged and which images run where.
//!
//! This crate only reads cluster state; it never mutates it.

pub mod core;
pub mod domain;
pub mod errors;
pub mod image;
