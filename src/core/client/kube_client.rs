use kube::Client;
use tracing::debug;

use crate::errors::Result;

/// Creates a Kubernetes client configured for in-cluster or local development
pub async fn build_kube_client() -> Result<Client> {
    // In-cluster config (service account token) or local kubeconfig,
    // whichever the environment provides.
    let client = Client::try_default().await?;

    debug!("Kubernetes client initialized successfully");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::{fmt, EnvFilter};

    #[tokio::test]
    async fn test_build_client() {
        let _ = fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_test_writer()
            .try_init();

        // Test that client creation doesn't panic
        let result = build_kube_client().await;
        // Allow both success and error (depends on environment)
        assert!(result.is_ok() || result.is_err());
    }
}
