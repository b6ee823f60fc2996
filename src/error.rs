use thiserror::Error;

/// Result type alias for operations that can fail with `ProviderError`
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Error taxonomy of the credential provider.
///
/// Configuration problems surface synchronously during validation or
/// initialization; acquisition failures surface from the refresh operation
/// and carry the underlying STS error unmodified. Neither is recovered
/// locally and no fallback credential is ever substituted.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Required configuration keys are missing or empty, or external-ID
    /// preconditions are unmet for the active connector class
    #[error("Configuration error: {message}")]
    Configuration {
        /// Detailed error message about the configuration issue
        message: String,
    },

    /// Failure surfaced by the STS AssumeRole call
    #[error("Credential acquisition error: {message}")]
    CredentialAcquisition {
        /// Detailed error message
        message: String,
        /// Underlying SDK error, when one exists
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl ProviderError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a credential acquisition error without an underlying cause
    pub fn credential_acquisition(message: impl Into<String>) -> Self {
        Self::CredentialAcquisition {
            message: message.into(),
            source: None,
        }
    }

    /// Create a credential acquisition error wrapping an SDK error
    pub fn credential_acquisition_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::CredentialAcquisition {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
