//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files. Every section has
//! defaults, so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::routing::controller::DEFAULT_LOCATIONS;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct WaymarkConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// Request-to-route resolution settings.
    pub routing: RoutingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Treat every request as HTTPS (TLS terminated in front of the server).
    pub tls_terminated: bool,

    /// Honour `X-Forwarded-Proto` from a trusted proxy. Off by default since clients can set it.
    pub trust_forwarded_proto: bool,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls_terminated: false,
            trust_forwarded_proto: false,
        }
    }
}

/// Routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RoutingConfig {
    /// Front-controller script path stripped from request URIs.
    pub script_name: String,

    /// Candidate controller source locations, `{controller}` replaced by the controller path.
    pub controller_locations: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            script_name: "/index.php".to_string(),
            controller_locations: DEFAULT_LOCATIONS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: WaymarkConfig = toml::from_str("").unwrap();
        assert_eq!(config, WaymarkConfig::default());
        assert_eq!(config.routing.script_name, "/index.php");
        assert_eq!(
            config.routing.controller_locations,
            vec!["{controller}", "controllers/{controller}"]
        );
    }

    #[test]
    fn test_partial_sections() {
        let config: WaymarkConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [routing]
            controller_locations = ["app/{controller}"]
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert!(!config.listener.tls_terminated);
        assert!(!config.listener.trust_forwarded_proto);
        assert_eq!(config.routing.script_name, "/index.php");
        assert_eq!(config.routing.controller_locations, vec!["app/{controller}"]);
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
