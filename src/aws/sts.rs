use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sts::Client as StsClient;
use tracing::{debug, info};

use super::Credentials;
use crate::error::{ProviderError, Result};

/// Immutable AssumeRole request template.
///
/// Built once during provider initialization and reused unchanged for every
/// credential refresh.
#[derive(Debug, Clone)]
pub struct AssumeRoleRequest {
    pub role_arn: String,
    pub session_name: String,
    pub external_id: Option<String>,
}

/// Role-assumption seam.
///
/// The production implementation calls AWS STS; tests substitute a double
/// so refresh behavior can be exercised without network access.
#[async_trait]
pub trait AssumeRole: Send + Sync {
    async fn assume_role(&self, request: &AssumeRoleRequest) -> Result<Credentials>;
}

/// STS-backed role assumption.
///
/// The client authenticates its own calls with the ambient default
/// credential chain (environment, profile, instance metadata); that identity
/// is distinct from the role being assumed.
pub struct StsAssumeRole {
    client: StsClient,
}

impl StsAssumeRole {
    /// Build a long-lived STS client bound to the given region.
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        Self {
            client: StsClient::new(&config),
        }
    }
}

#[async_trait]
impl AssumeRole for StsAssumeRole {
    async fn assume_role(&self, request: &AssumeRoleRequest) -> Result<Credentials> {
        info!("Calling AWS STS AssumeRole");
        debug!("Role ARN: {}", request.role_arn);
        debug!("Session name: {}", request.session_name);

        let mut call = self
            .client
            .assume_role()
            .role_arn(&request.role_arn)
            .role_session_name(&request.session_name);
        if let Some(external_id) = &request.external_id {
            call = call.external_id(external_id);
        }

        let response = call.send().await.map_err(|e| {
            ProviderError::credential_acquisition_with_source("Failed to assume AWS role", e)
        })?;

        let sts_creds = response.credentials().ok_or_else(|| {
            ProviderError::credential_acquisition("AWS STS returned no credentials")
        })?;

        debug!("Credentials expire at: {}", sts_creds.expiration());

        Ok(Credentials {
            access_key_id: sts_creds.access_key_id().to_string(),
            secret_access_key: sts_creds.secret_access_key().to_string(),
            session_token: sts_creds.session_token().to_string(),
            expiration: *sts_creds.expiration(),
        })
    }
}
