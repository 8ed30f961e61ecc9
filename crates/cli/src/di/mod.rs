use dnsplit_application::services::{ConditionEvaluator, RuleEngine};
use dnsplit_application::use_cases::HandleDatagramUseCase;
use dnsplit_domain::Config;
use dnsplit_infrastructure::dns::{HickoryDnsCodec, UdpForwarder};
use dnsplit_infrastructure::random::ThreadRandom;
use dnsplit_infrastructure::system::SystemInterfaces;
use std::sync::Arc;
use tracing::info;

/// Everything the listener needs, wired once at startup and never mutated.
pub struct DnsServices {
    pub handler: Arc<HandleDatagramUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let table = Arc::new(config.routing_table()?);

        for (position, rule) in table.rules().iter().enumerate() {
            let patterns: Vec<&str> = rule
                .matcher
                .patterns()
                .iter()
                .map(|p| p.as_str())
                .collect();
            let condition = rule.matcher.condition().map(|c| c.to_string());
            let nameservers: Vec<String> =
                rule.nameservers.iter().map(|ns| ns.to_string()).collect();
            info!(
                position = position + 1,
                rule = %rule.name,
                patterns = ?patterns,
                condition = ?condition,
                nameservers = ?nameservers,
                "Routing rule"
            );
        }

        let conditions = ConditionEvaluator::new(Arc::new(SystemInterfaces::new()));
        let engine = RuleEngine::new(table, conditions, Arc::new(ThreadRandom));

        let handler = Arc::new(HandleDatagramUseCase::new(
            Arc::new(HickoryDnsCodec::new()),
            Arc::new(engine),
            Arc::new(UdpForwarder::new()),
        ));

        Ok(Self { handler })
    }
}
