use thiserror::Error;

use crate::image::ParseRefError;

pub type Result<T> = std::result::Result<T, WorkloadError>;

#[derive(Debug, Error)]
pub enum WorkloadError {
    /// Transport and not-found errors from the cluster API, propagated
    /// unchanged so the caller can tell a missing workload from an outage.
    #[error(transparent)]
    K8sApi(#[from] kube::Error),

    /// A chart values block declared an image in a shape the decoder does not
    /// support (missing `repository`, or an unsupported value type at a
    /// strict decode site).
    #[error("malformed image reference in chart values")]
    MalformedImageReference,

    #[error(transparent)]
    ImageParse(#[from] ParseRefError),
}
