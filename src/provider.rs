use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::aws::AwsCredential;
use crate::aws::sts::{AssumeRole, AssumeRoleRequest, StsAssumeRole};
use crate::config::{self, ProviderConfig};
use crate::constants::{EXTERNAL_SOURCE, MONGODB_AWS_MECHANISM};
use crate::error::{ProviderError, Result};

/// Zero-argument credential refresh operation.
///
/// Cheap to clone: the STS client and the request template are shared. Every
/// call to [`refresh`](Self::refresh) performs one AssumeRole round trip;
/// nothing is cached between calls.
#[derive(Clone)]
pub struct AwsCredentialSupplier {
    client: Arc<dyn AssumeRole>,
    request: Arc<AssumeRoleRequest>,
}

impl AwsCredentialSupplier {
    /// Fetch a fresh credential triple from the role-assumption service.
    ///
    /// Failures propagate unmodified; there is no retry and no fallback.
    pub async fn refresh(&self) -> Result<AwsCredential> {
        debug!("Getting new AWS credentials");
        let credentials = self.client.assume_role(&self.request).await?;
        Ok(AwsCredential::from(credentials))
    }
}

/// Authentication descriptor handed to the MongoDB client.
///
/// Tagged with the `MONGODB-AWS` mechanism and the `$external` source, and
/// carrying the refresh supplier as its single mechanism property.
#[derive(Clone)]
pub struct MongoCredential {
    mechanism: &'static str,
    source: &'static str,
    supplier: AwsCredentialSupplier,
}

impl MongoCredential {
    fn aws(supplier: AwsCredentialSupplier) -> Self {
        Self {
            mechanism: MONGODB_AWS_MECHANISM,
            source: EXTERNAL_SOURCE,
            supplier,
        }
    }

    pub fn mechanism(&self) -> &str {
        self.mechanism
    }

    pub fn source(&self) -> &str {
        self.source
    }

    /// The `aws_credential_provider` mechanism property
    pub fn aws_credential_supplier(&self) -> &AwsCredentialSupplier {
        &self.supplier
    }
}

struct ProviderState {
    client: Arc<dyn AssumeRole>,
    request: Arc<AssumeRoleRequest>,
}

/// Custom credential provider assuming an IAM role via AWS STS.
///
/// The host invokes [`validate`](Self::validate) at registration time,
/// [`init`](Self::init) once before first use, then
/// [`get_custom_credential`](Self::get_custom_credential) for every client
/// needing a credential handle. Re-running `init` replaces the stored client
/// and template (last write wins); the host serializes initialization, so no
/// locking is provided here.
#[derive(Default)]
pub struct AwsAssumeRoleCredentialProvider {
    state: Option<ProviderState>,
}

impl AwsAssumeRoleCredentialProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the host configuration without side effects.
    pub fn validate(&self, configs: &HashMap<String, String>) -> Result<()> {
        config::validate(configs)
    }

    /// Resolve the configuration, build the STS client bound to the resolved
    /// region, and store the immutable request template.
    pub async fn init(&mut self, configs: &HashMap<String, String>) -> Result<()> {
        let config = ProviderConfig::from_configs(configs)?;
        let client = Arc::new(StsAssumeRole::new(&config.region).await);
        self.init_with_client(config, client);
        Ok(())
    }

    /// Initialize with an injected role-assumption client.
    ///
    /// This is the seam [`init`](Self::init) goes through after building the
    /// real STS client; tests use it to supply a double.
    pub fn init_with_client(&mut self, config: ProviderConfig, client: Arc<dyn AssumeRole>) {
        let request = AssumeRoleRequest {
            role_arn: config.role_arn,
            session_name: config.session_name,
            external_id: config.external_id,
        };

        self.state = Some(ProviderState {
            client,
            request: Arc::new(request),
        });
    }

    /// Produce the authentication descriptor for a MongoDB client.
    ///
    /// Fails when called before [`init`](Self::init).
    pub fn get_custom_credential(
        &self,
        _configs: &HashMap<String, String>,
    ) -> Result<MongoCredential> {
        let state = self.state.as_ref().ok_or_else(|| {
            ProviderError::configuration(
                "Credential provider not initialized. init must run before requesting credentials.",
            )
        })?;

        Ok(MongoCredential::aws(AwsCredentialSupplier {
            client: Arc::clone(&state.client),
            request: Arc::clone(&state.request),
        }))
    }
}
