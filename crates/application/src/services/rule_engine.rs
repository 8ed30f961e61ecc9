use dnsplit_domain::{Nameserver, Rule, RoutingTable, RuleMatch};
use std::sync::Arc;
use tracing::debug;

use super::ConditionEvaluator;
use crate::ports::RandomSource;

/// Where a query goes and which rule sent it there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route<'a> {
    /// `None` when no rule won and the defaults were used.
    pub rule: Option<&'a str>,
    pub nameserver: &'a Nameserver,
}

/// First-match-wins evaluation of the routing table.
pub struct RuleEngine {
    table: Arc<RoutingTable>,
    conditions: ConditionEvaluator,
    random: Arc<dyn RandomSource>,
}

impl RuleEngine {
    pub fn new(
        table: Arc<RoutingTable>,
        conditions: ConditionEvaluator,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            table,
            conditions,
            random,
        }
    }

    pub fn select_nameserver(&self, qname: &str) -> &Nameserver {
        self.route(qname).nameserver
    }

    pub fn route(&self, qname: &str) -> Route<'_> {
        for rule in self.table.rules() {
            if self.is_candidate(rule, qname) {
                debug!(domain = %qname, rule = %rule.name, "Rule matched");
                return Route {
                    rule: Some(&*rule.name),
                    nameserver: self.pick(&rule.nameservers),
                };
            }
        }

        debug!(domain = %qname, "No rule matched, using default nameservers");
        Route {
            rule: None,
            nameserver: self.pick(self.table.default_nameservers()),
        }
    }

    // Names are checked before conditions: a pattern miss never touches
    // the host's interface tables.
    fn is_candidate(&self, rule: &Rule, qname: &str) -> bool {
        match &rule.matcher {
            RuleMatch::MatchOnly { .. } => rule.matcher.matches_name(qname),
            RuleMatch::ConditionOnly { condition } => self.conditions.is_met(condition),
            RuleMatch::MatchAndCondition { condition, .. } => {
                rule.matcher.matches_name(qname) && self.conditions.is_met(condition)
            }
        }
    }

    // RoutingTable guarantees every list is non-empty.
    fn pick<'a>(&self, nameservers: &'a [Nameserver]) -> &'a Nameserver {
        let last = nameservers.len() - 1;
        &nameservers[self.random.pick(nameservers.len()).min(last)]
    }
}
