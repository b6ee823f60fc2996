/// Configuration key for the IAM role ARN to assume
pub const ROLE_ARN_CONFIG: &str = "mongodbaws.auth.mechanism.roleArn";

/// Configuration key for the AWS region used for STS calls
pub const REGION_CONFIG: &str = "mongodbaws.auth.mechanism.region";

/// Configuration key for the role session name
pub const SESSION_NAME_CONFIG: &str = "mongodbaws.auth.mechanism.roleSessionName";

/// Configuration key enabling external-ID derivation
pub const EXTERNAL_ID_ENABLED_CONFIG: &str = "mongodbaws.auth.mechanism.externalIdEnabled";

/// Kafka Connect key naming the connector class in use
pub const CONNECTOR_CLASS_CONFIG: &str = "connector.class";

/// Sink connector key listing the topics written to MongoDB
pub const TOPICS_CONFIG: &str = "topics";

/// Source connector key naming the watched database
pub const DATABASE_CONFIG: &str = "database";

/// Source connector key naming the watched collection
pub const COLLECTION_CONFIG: &str = "collection";

/// Connector class of the MongoDB Kafka sink connector
pub const MONGO_SINK_CONNECTOR_CLASS: &str = "com.mongodb.kafka.connect.MongoSinkConnector";

/// Connector class of the MongoDB Kafka source connector
pub const MONGO_SOURCE_CONNECTOR_CLASS: &str = "com.mongodb.kafka.connect.MongoSourceConnector";

/// Default AWS region for STS operations when no region is configured
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// Prefix for generated role session names (a random UUID is appended)
pub const SESSION_NAME_PREFIX: &str = "MONGO-CONNECTOR-SESSION-";

/// MongoDB authentication mechanism name for AWS IAM credentials
pub const MONGODB_AWS_MECHANISM: &str = "MONGODB-AWS";

/// Authentication source for externally managed credentials
pub const EXTERNAL_SOURCE: &str = "$external";

/// Mechanism property key carrying the credential refresh operation
pub const AWS_CREDENTIAL_PROVIDER_KEY: &str = "aws_credential_provider";
