//! Configuration wiring tests: loaded settings drive the composer and
//! telemetry setup.

use catena::prelude::*;
use catena::config::{LogFormat, LoggingConfig};
use catena::telemetry::LogConfig;
use std::sync::Arc;

type Step = Arc<dyn Fn(u64) -> u64 + Send + Sync>;

fn chain(links: usize) -> Chain<Step> {
    let mut chain: Chain<Step> = (0..links)
        .map(|_| Element::link(|next: Step| -> Step { Arc::new(move |n: u64| next(n + 1)) }))
        .collect();
    chain.push_terminal(|| -> Step { Arc::new(|n: u64| n) });
    chain
}

#[test]
fn test_loaded_composer_config_is_applied() {
    let config = ConfigLoader::new()
        .with_string(
            r#"
            [composer]
            strategy = "recursive"
            recursion_limit = 8

            [logging]
            format = "pretty"
            "#,
            "toml",
        )
        .unwrap()
        .load()
        .unwrap();

    assert_eq!(config.logging.format, LogFormat::Pretty);

    let composer = config.composer();
    assert_eq!(composer.strategy_for(8), ComposeStrategy::Recursive);
    assert_eq!(composer.strategy_for(9), ComposeStrategy::Iterative);

    let run = chain(100).compose_with(&composer).unwrap();
    assert_eq!(run(0), 100);
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = ConfigLoader::new()
        .with_string(r#"{"composer": {"strategy": "sideways"}}"#, "json");
    assert!(matches!(result, Err(ConfigError::JsonError(_))));
}

#[test]
fn test_telemetry_from_config_with_logging_disabled() {
    let config = CatenaConfig {
        logging: LoggingConfig {
            enabled: false,
            ..LoggingConfig::default()
        },
        ..CatenaConfig::default()
    };

    let telemetry = config.telemetry_config();
    assert_eq!(telemetry.logging.enabled, LogConfig::disabled().enabled);
    assert!(init_telemetry(&telemetry).is_ok());
}
