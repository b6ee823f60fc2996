use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::constants::{
    COLLECTION_CONFIG, CONNECTOR_CLASS_CONFIG, DATABASE_CONFIG, DEFAULT_AWS_REGION,
    EXTERNAL_ID_ENABLED_CONFIG, MONGO_SINK_CONNECTOR_CLASS, MONGO_SOURCE_CONNECTOR_CLASS,
    REGION_CONFIG, ROLE_ARN_CONFIG, SESSION_NAME_CONFIG, SESSION_NAME_PREFIX, TOPICS_CONFIG,
};
use crate::error::{ProviderError, Result};

/// Which MongoDB Kafka connector the provider is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorClass {
    Sink,
    Source,
}

impl ConnectorClass {
    fn from_configs(configs: &HashMap<String, String>) -> Result<Self> {
        match configs.get(CONNECTOR_CLASS_CONFIG).map(String::as_str) {
            Some(MONGO_SINK_CONNECTOR_CLASS) => Ok(Self::Sink),
            Some(MONGO_SOURCE_CONNECTOR_CLASS) => Ok(Self::Source),
            Some(other) => Err(ProviderError::configuration(format!(
                "Unrecognized connector class '{other}'."
            ))),
            None => Err(ProviderError::configuration(format!(
                "{CONNECTOR_CLASS_CONFIG} must be set when {EXTERNAL_ID_ENABLED_CONFIG} is set to true."
            ))),
        }
    }
}

/// Validated provider configuration with all defaults resolved.
///
/// Produced from the host's string-keyed map by [`ProviderConfig::from_configs`];
/// no field is reassigned after construction.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub role_arn: String,
    pub region: String,
    pub session_name: String,
    pub external_id: Option<String>,
}

impl ProviderConfig {
    /// Parse and validate the host configuration map.
    ///
    /// Resolves the region to `us-east-1` when none is configured, generates
    /// a unique session name when none is configured (fresh on every call),
    /// and derives the external ID from the connector settings when the
    /// external-ID flag is enabled.
    pub fn from_configs(configs: &HashMap<String, String>) -> Result<Self> {
        validate(configs)?;

        // Safe to index after validation: the role ARN is present and non-empty
        let role_arn = configs[ROLE_ARN_CONFIG].clone();

        let region = match configs.get(REGION_CONFIG) {
            Some(region) => {
                debug!("Region provided in config: {}", region);
                region.clone()
            }
            None => {
                debug!("Defaulting to {} region", DEFAULT_AWS_REGION);
                DEFAULT_AWS_REGION.to_string()
            }
        };

        let session_name = match configs.get(SESSION_NAME_CONFIG) {
            Some(session_name) => {
                debug!("Session name provided in config: {}", session_name);
                session_name.clone()
            }
            None => {
                debug!("Generating session name with random UUID");
                generate_session_name()
            }
        };

        let external_id = derive_external_id(configs)?;

        Ok(Self {
            role_arn,
            region,
            session_name,
            external_id,
        })
    }
}

/// Validate the host configuration map.
///
/// Pure check with no side effects and no network I/O. Fails when the role
/// ARN is missing or empty, or when external-ID preconditions are unmet for
/// the active connector class.
pub fn validate(configs: &HashMap<String, String>) -> Result<()> {
    debug!("Validating role ARN");
    match configs.get(ROLE_ARN_CONFIG) {
        Some(role_arn) if !role_arn.is_empty() => {}
        _ => return Err(ProviderError::configuration("AWS Role ARN not provided.")),
    }

    debug!("Validating external ID config");
    if external_id_enabled(configs) {
        match ConnectorClass::from_configs(configs)? {
            ConnectorClass::Sink => {
                if configs.get(TOPICS_CONFIG).is_none_or(String::is_empty) {
                    return Err(ProviderError::configuration(format!(
                        "{TOPICS_CONFIG} must be set when {EXTERNAL_ID_ENABLED_CONFIG} is set to true."
                    )));
                }
            }
            ConnectorClass::Source => {
                if configs.get(DATABASE_CONFIG).is_none_or(String::is_empty)
                    || configs.get(COLLECTION_CONFIG).is_none_or(String::is_empty)
                {
                    return Err(ProviderError::configuration(format!(
                        "{DATABASE_CONFIG} and {COLLECTION_CONFIG} must be set when {EXTERNAL_ID_ENABLED_CONFIG} is set to true."
                    )));
                }
            }
        }
    }

    Ok(())
}

fn external_id_enabled(configs: &HashMap<String, String>) -> bool {
    // Anything other than "true" (case-insensitive) counts as disabled
    configs
        .get(EXTERNAL_ID_ENABLED_CONFIG)
        .is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

fn derive_external_id(configs: &HashMap<String, String>) -> Result<Option<String>> {
    if !external_id_enabled(configs) {
        return Ok(None);
    }

    let external_id = match ConnectorClass::from_configs(configs)? {
        ConnectorClass::Sink => configs.get(TOPICS_CONFIG).cloned(),
        ConnectorClass::Source => {
            match (configs.get(DATABASE_CONFIG), configs.get(COLLECTION_CONFIG)) {
                (Some(database), Some(collection)) => Some(format!("{database}-{collection}")),
                _ => None,
            }
        }
    };

    if let Some(external_id) = &external_id {
        debug!("Derived external ID: {}", external_id);
    }

    Ok(external_id.filter(|id| !id.is_empty()))
}

fn generate_session_name() -> String {
    format!("{SESSION_NAME_PREFIX}{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_configs() -> HashMap<String, String> {
        let mut configs = HashMap::new();
        configs.insert(
            ROLE_ARN_CONFIG.to_string(),
            "arn:aws:iam::123456789012:role/connector-role".to_string(),
        );
        configs.insert(REGION_CONFIG.to_string(), "us-east-1".to_string());
        configs.insert(SESSION_NAME_CONFIG.to_string(), "test-session".to_string());
        configs
    }

    fn set(configs: &mut HashMap<String, String>, key: &str, value: &str) {
        configs.insert(key.to_string(), value.to_string());
    }

    #[test]
    fn test_validate_minimal_config() {
        assert!(validate(&base_configs()).is_ok());
    }

    #[test]
    fn test_validate_missing_role_arn() {
        let mut configs = base_configs();
        configs.remove(ROLE_ARN_CONFIG);

        let result = validate(&configs);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("AWS Role ARN not provided")
        );
    }

    #[test]
    fn test_validate_empty_role_arn() {
        let mut configs = base_configs();
        set(&mut configs, ROLE_ARN_CONFIG, "");

        assert!(validate(&configs).is_err());
    }

    #[test]
    fn test_validate_sink_connector_without_topics() {
        let mut configs = base_configs();
        set(&mut configs, EXTERNAL_ID_ENABLED_CONFIG, "true");
        set(&mut configs, CONNECTOR_CLASS_CONFIG, MONGO_SINK_CONNECTOR_CLASS);
        // Source connector keys must not satisfy a sink connector
        set(&mut configs, DATABASE_CONFIG, "dummy");
        set(&mut configs, COLLECTION_CONFIG, "dummy");

        let result = validate(&configs);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains(TOPICS_CONFIG));
    }

    #[test]
    fn test_validate_sink_connector_with_empty_topics() {
        let mut configs = base_configs();
        set(&mut configs, EXTERNAL_ID_ENABLED_CONFIG, "true");
        set(&mut configs, CONNECTOR_CLASS_CONFIG, MONGO_SINK_CONNECTOR_CLASS);
        set(&mut configs, TOPICS_CONFIG, "");

        assert!(validate(&configs).is_err());
    }

    #[test]
    fn test_validate_source_connector_without_database_and_collection() {
        let mut configs = base_configs();
        set(&mut configs, EXTERNAL_ID_ENABLED_CONFIG, "true");
        set(&mut configs, CONNECTOR_CLASS_CONFIG, MONGO_SOURCE_CONNECTOR_CLASS);
        // Sink connector keys must not satisfy a source connector
        set(&mut configs, TOPICS_CONFIG, "dummy");

        let result = validate(&configs);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains(DATABASE_CONFIG));
    }

    #[test]
    fn test_validate_source_connector_with_empty_collection() {
        let mut configs = base_configs();
        set(&mut configs, EXTERNAL_ID_ENABLED_CONFIG, "true");
        set(&mut configs, CONNECTOR_CLASS_CONFIG, MONGO_SOURCE_CONNECTOR_CLASS);
        set(&mut configs, DATABASE_CONFIG, "source-db");
        set(&mut configs, COLLECTION_CONFIG, "");

        assert!(validate(&configs).is_err());
    }

    #[test]
    fn test_validate_unrecognized_connector_class() {
        let mut configs = base_configs();
        set(&mut configs, EXTERNAL_ID_ENABLED_CONFIG, "true");
        set(&mut configs, CONNECTOR_CLASS_CONFIG, "com.example.SomeOtherConnector");

        assert!(validate(&configs).is_err());
    }

    #[test]
    fn test_validate_external_id_disabled_skips_connector_checks() {
        let mut configs = base_configs();
        set(&mut configs, EXTERNAL_ID_ENABLED_CONFIG, "false");

        assert!(validate(&configs).is_ok());
    }

    #[test]
    fn test_sink_connector_external_id_equals_topics() {
        let mut configs = base_configs();
        set(&mut configs, EXTERNAL_ID_ENABLED_CONFIG, "true");
        set(&mut configs, CONNECTOR_CLASS_CONFIG, MONGO_SINK_CONNECTOR_CLASS);
        set(&mut configs, TOPICS_CONFIG, "source-topic");

        let config = ProviderConfig::from_configs(&configs).unwrap();
        assert_eq!(config.external_id.as_deref(), Some("source-topic"));
    }

    #[test]
    fn test_source_connector_external_id_joins_database_and_collection() {
        let mut configs = base_configs();
        set(&mut configs, EXTERNAL_ID_ENABLED_CONFIG, "true");
        set(&mut configs, CONNECTOR_CLASS_CONFIG, MONGO_SOURCE_CONNECTOR_CLASS);
        set(&mut configs, DATABASE_CONFIG, "source-db");
        set(&mut configs, COLLECTION_CONFIG, "source-collection");

        let config = ProviderConfig::from_configs(&configs).unwrap();
        assert_eq!(
            config.external_id.as_deref(),
            Some("source-db-source-collection")
        );
    }

    #[test]
    fn test_external_id_absent_when_disabled() {
        let config = ProviderConfig::from_configs(&base_configs()).unwrap();
        assert_eq!(config.external_id, None);
    }

    #[test]
    fn test_explicit_region_and_session_name_are_kept() {
        let config = ProviderConfig::from_configs(&base_configs()).unwrap();
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.session_name, "test-session");
    }

    #[test]
    fn test_region_defaults_to_us_east_1() {
        let mut configs = base_configs();
        configs.remove(REGION_CONFIG);

        let config = ProviderConfig::from_configs(&configs).unwrap();
        assert_eq!(config.region, DEFAULT_AWS_REGION);
    }

    #[test]
    fn test_generated_session_name_has_prefix_and_valid_uuid() {
        let mut configs = base_configs();
        configs.remove(SESSION_NAME_CONFIG);

        let config = ProviderConfig::from_configs(&configs).unwrap();
        let suffix = config
            .session_name
            .strip_prefix(SESSION_NAME_PREFIX)
            .expect("generated session name should carry the fixed prefix");
        assert!(Uuid::parse_str(suffix).is_ok());
    }

    #[test]
    fn test_generated_session_name_differs_across_calls() {
        let mut configs = base_configs();
        configs.remove(SESSION_NAME_CONFIG);

        let first = ProviderConfig::from_configs(&configs).unwrap();
        let second = ProviderConfig::from_configs(&configs).unwrap();
        assert_ne!(first.session_name, second.session_name);
    }
}
