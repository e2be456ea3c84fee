//! API configuration

use serde::Deserialize;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Base URL of the postal-code lookup service
    pub address_service_url: String,
    /// Optional API key for the postal-code lookup service
    pub address_service_api_key: Option<String>,
    /// Base URL of the tax authority service
    pub tax_authority_url: String,
    /// Request timeout for both external services, in seconds
    pub external_timeout_secs: u64,
    /// Whether inserts check the tax id against the authority
    pub validate_tax_id: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/customers".to_string(),
            log_level: "info".to_string(),
            address_service_url: "http://localhost:8081/addresses".to_string(),
            address_service_api_key: None,
            tax_authority_url: "http://localhost:8082/tax-ids".to_string(),
            external_timeout_secs: 30,
            validate_tax_id: true,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert!(config.validate_tax_id);
        assert!(config.address_service_api_key.is_none());
    }
}
