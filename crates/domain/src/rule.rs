use crate::condition::Condition;
use crate::domain_pattern::DomainPattern;
use crate::nameserver::Nameserver;
use std::sync::Arc;

/// What a rule needs to hold before it can win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleMatch {
    MatchOnly {
        patterns: Vec<DomainPattern>,
    },
    ConditionOnly {
        condition: Condition,
    },
    MatchAndCondition {
        patterns: Vec<DomainPattern>,
        condition: Condition,
    },
}

impl RuleMatch {
    pub fn patterns(&self) -> &[DomainPattern] {
        match self {
            RuleMatch::MatchOnly { patterns } | RuleMatch::MatchAndCondition { patterns, .. } => {
                patterns
            }
            RuleMatch::ConditionOnly { .. } => &[],
        }
    }

    pub fn condition(&self) -> Option<&Condition> {
        match self {
            RuleMatch::ConditionOnly { condition }
            | RuleMatch::MatchAndCondition { condition, .. } => Some(condition),
            RuleMatch::MatchOnly { .. } => None,
        }
    }

    /// True when any pattern matches `qname`. Condition-only rules never
    /// match by name.
    pub fn matches_name(&self, qname: &str) -> bool {
        self.patterns().iter().any(|p| p.matches(qname))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: Arc<str>,
    pub matcher: RuleMatch,
    pub nameservers: Vec<Nameserver>,
}

impl Rule {
    pub fn new(
        name: impl Into<Arc<str>>,
        matcher: RuleMatch,
        nameservers: Vec<Nameserver>,
    ) -> Self {
        Self {
            name: name.into(),
            matcher,
            nameservers,
        }
    }
}
