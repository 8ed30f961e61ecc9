use dnsplit_domain::{CliOverrides, Config};
use tracing::info;

/// Loads and validates the configuration. Any error here is fatal.
pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn log_config(config_path: Option<&str>, config: &Config) {
    let source = config_path
        .map(str::to_string)
        .or_else(Config::get_config_path)
        .unwrap_or_else(|| "built-in defaults".to_string());

    info!(
        config_file = %source,
        dns_port = config.server.dns_port,
        bind = %config.server.bind_address,
        rules = config.rules.len(),
        default_nameservers = ?config.dns.default_nameservers,
        "Configuration loaded"
    );
}
