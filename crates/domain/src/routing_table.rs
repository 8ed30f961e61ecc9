use crate::config::ConfigError;
use crate::nameserver::Nameserver;
use crate::rule::Rule;

/// Ordered rules plus the fallback nameservers.
///
/// Built once from the configuration and only read afterwards. Both lists
/// are guaranteed non-empty where it matters: `default_nameservers` always,
/// and each rule's `nameservers`.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    rules: Vec<Rule>,
    default_nameservers: Vec<Nameserver>,
}

impl RoutingTable {
    pub fn new(
        rules: Vec<Rule>,
        default_nameservers: Vec<Nameserver>,
    ) -> Result<Self, ConfigError> {
        if default_nameservers.is_empty() {
            return Err(ConfigError::Validation(
                "No default nameservers configured".to_string(),
            ));
        }

        if let Some(rule) = rules.iter().find(|r| r.nameservers.is_empty()) {
            return Err(ConfigError::InvalidRule {
                rule: rule.name.to_string(),
                reason: "no nameservers configured".to_string(),
            });
        }

        Ok(Self {
            rules,
            default_nameservers,
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn default_nameservers(&self) -> &[Nameserver] {
        &self.default_nameservers
    }
}
