use serde::Deserialize;

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::rules::RuleConfig;
use super::server::ServerConfig;
use crate::nameserver::Nameserver;
use crate::routing_table::RoutingTable;

const CONFIG_SEARCH_PATHS: [&str; 3] = [
    "dnsplit.toml",
    "/etc/dnsplit/config.toml",
    "/etc/dnsplit.toml",
];

/// Main configuration structure for dnsplit
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Listener configuration (bind address, port, concurrency)
    #[serde(default)]
    pub server: ServerConfig,

    /// Default upstream nameservers
    #[serde(default)]
    pub dns: DnsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Ordered routing rules, first match wins
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnsplit.toml in current directory
    /// 3. /etc/dnsplit/config.toml
    /// 4. /etc/dnsplit.toml
    /// 5. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(max) = overrides.max_concurrent_requests {
            self.server.max_concurrent_requests = max;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    ///
    /// Builds the routing table once so that every rule, pattern, condition
    /// and nameserver is checked before the server starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.max_concurrent_requests == 0 {
            return Err(ConfigError::Validation(
                "max_concurrent_requests must be at least 1".to_string(),
            ));
        }

        self.routing_table().map(|_| ())
    }

    /// Build the immutable routing table the rule engine evaluates.
    pub fn routing_table(&self) -> Result<RoutingTable, ConfigError> {
        if self.dns.default_nameservers.is_empty() {
            return Err(ConfigError::Validation(
                "No default nameservers configured".to_string(),
            ));
        }

        let default_nameservers = self
            .dns
            .default_nameservers
            .iter()
            .map(|ns| {
                ns.parse::<Nameserver>().map_err(|e| {
                    ConfigError::Validation(format!("default nameserver: {}", e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rules = self
            .rules
            .iter()
            .enumerate()
            .map(|(index, rule)| rule.build(index))
            .collect::<Result<Vec<_>, _>>()?;

        RoutingTable::new(rules, default_nameservers)
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        CONFIG_SEARCH_PATHS
            .iter()
            .find(|path| std::path::Path::new(path).exists())
            .map(|path| path.to_string())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub max_concurrent_requests: Option<usize>,
    pub log_level: Option<String>,
}
