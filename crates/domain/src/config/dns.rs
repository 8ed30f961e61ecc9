use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DnsConfig {
    /// Used when no rule is a candidate for a query.
    #[serde(default = "default_nameservers")]
    pub default_nameservers: Vec<String>,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            default_nameservers: default_nameservers(),
        }
    }
}

fn default_nameservers() -> Vec<String> {
    vec!["8.8.8.8".to_string(), "1.1.1.1".to_string()]
}
