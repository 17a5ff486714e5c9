//! Readiness classification for replicated workloads.
//!
//! Status is derived, never stored: every fetch recomputes it from the
//! generation and replica counters the control plane reports.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadStatus {
    /// The definition has been observed and every replica is up to date.
    Ready,
    /// The control plane has not yet processed the latest definition.
    Updating,
    /// Rollout in flight: some replicas still run the previous definition.
    Rollout { updated: i32, desired: i32 },
}

impl fmt::Display for WorkloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadStatus::Ready => write!(f, "ready"),
            WorkloadStatus::Updating => write!(f, "updating"),
            WorkloadStatus::Rollout { updated, desired } => {
                write!(f, "{} out of {} updated", updated, desired)
            }
        }
    }
}

/// Classify a workload from its generation and replica counters.
///
/// An observed generation behind the current one means the definition change
/// has not been seen yet, regardless of what the replica counts say.
pub fn rollout_status(
    generation: i64,
    observed_generation: i64,
    updated: i32,
    desired: i32,
) -> WorkloadStatus {
    if observed_generation < generation {
        return WorkloadStatus::Updating;
    }
    // the definition has been observed; now let's see about the replicas
    if updated == desired {
        WorkloadStatus::Ready
    } else {
        WorkloadStatus::Rollout { updated, desired }
    }
}
