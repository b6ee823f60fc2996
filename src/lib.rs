//! AWS AssumeRole credential provider for MongoDB clients.
//!
//! Supplies short-lived AWS credentials to a MongoDB client authenticating
//! with the `MONGODB-AWS` mechanism by assuming an IAM role via STS. The
//! host framework drives three lifecycle operations in order:
//!
//! 1. [`AwsAssumeRoleCredentialProvider::validate`] at registration time,
//! 2. [`AwsAssumeRoleCredentialProvider::init`] once at startup,
//! 3. [`AwsAssumeRoleCredentialProvider::get_custom_credential`] whenever a
//!    client needs a credential handle.
//!
//! The returned [`MongoCredential`] descriptor carries a zero-argument
//! refresh operation; every invocation of it performs one STS round trip
//! and yields a fresh (access key, secret key, session token) triple.

pub mod aws;
pub mod config;
pub mod constants;
pub mod error;
pub mod provider;

pub use config::{ConnectorClass, ProviderConfig};
pub use error::{ProviderError, Result};
pub use provider::{AwsAssumeRoleCredentialProvider, AwsCredentialSupplier, MongoCredential};
