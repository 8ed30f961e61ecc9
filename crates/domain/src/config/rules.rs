use serde::Deserialize;

use super::errors::ConfigError;
use crate::condition::Condition;
use crate::domain_pattern::DomainPattern;
use crate::nameserver::Nameserver;
use crate::rule::{Rule, RuleMatch};

/// A routing rule as written in the configuration file.
///
/// ```toml
/// [[rules]]
/// name = "office"
/// match = ["*.corp.local"]
/// condition = "eth0 192.168.1.0/24"
/// nameservers = ["192.168.1.1"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "match", default)]
    pub patterns: Option<Vec<String>>,

    #[serde(default)]
    pub condition: Option<String>,

    #[serde(default)]
    pub nameservers: Vec<String>,
}

impl RuleConfig {
    /// Validates the raw fields and builds the rule the engine evaluates.
    ///
    /// `index` only names anonymous rules in error messages and logs.
    pub fn build(&self, index: usize) -> Result<Rule, ConfigError> {
        let name = if self.name.trim().is_empty() {
            format!("rule-{}", index + 1)
        } else {
            self.name.clone()
        };

        let invalid = |reason: String| ConfigError::InvalidRule {
            rule: name.clone(),
            reason,
        };

        let patterns = self
            .patterns
            .as_ref()
            .map(|patterns| {
                if patterns.is_empty() {
                    return Err(invalid("'match' list cannot be empty".to_string()));
                }
                patterns
                    .iter()
                    .map(|p| DomainPattern::new(p).map_err(|e| invalid(e.to_string())))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        let condition = self
            .condition
            .as_deref()
            .map(|c| c.parse::<Condition>().map_err(|e| invalid(e.to_string())))
            .transpose()?;

        let matcher = match (patterns, condition) {
            (Some(patterns), None) => RuleMatch::MatchOnly { patterns },
            (None, Some(condition)) => RuleMatch::ConditionOnly { condition },
            (Some(patterns), Some(condition)) => RuleMatch::MatchAndCondition {
                patterns,
                condition,
            },
            (None, None) => {
                return Err(invalid(
                    "needs at least a 'match' or a 'condition' parameter".to_string(),
                ))
            }
        };

        if self.nameservers.is_empty() {
            return Err(invalid("no nameservers configured".to_string()));
        }

        let nameservers = self
            .nameservers
            .iter()
            .map(|ns| ns.parse::<Nameserver>().map_err(|e| invalid(e.to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Rule::new(name, matcher, nameservers))
    }
}
