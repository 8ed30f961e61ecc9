use dnsplit_domain::Config;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` directives, when set, refine
/// the level from the configuration.
pub fn init_logging(config: &Config) {
    let level = level_filter(&config.logging.level);
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_target(true)
        .with_thread_ids(false)
        .with_level(true)
        .with_env_filter(filter)
        .with_ansi(true)
        .init();

    info!("Logging initialized at level: {}", level);
}

fn level_filter(level: &str) -> LevelFilter {
    level
        .parse::<tracing::Level>()
        .map(LevelFilter::from_level)
        .unwrap_or(LevelFilter::INFO)
}
