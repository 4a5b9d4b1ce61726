//! Integration tests for environment-based configuration.
//!
//! Environment variables are process-wide, so every case lives in one test
//! and this binary holds nothing else.
//!
//! Run with: cargo test --test config_tests

use std::env;
use std::time::Duration;

use loyverse_rs::{ClientConfig, Error, LoyverseClient};

const VARS: [&str; 5] = [
    "LOYVERSE_ACCESS_TOKEN",
    "LOYVERSE_API_BASE_URL",
    "LOYVERSE_API_VERSION",
    "LOYVERSE_TIMEOUT_SECS",
    "LOYVERSE_CONNECT_TIMEOUT_SECS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_config_from_env() {
    // Defaults, and a missing token only fails at client construction
    clear_env();
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url(), "https://api.loyverse.com/v1.0");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.connect_timeout, Duration::from_secs(10));
    assert!(LoyverseClient::new(config).is_err());

    // Every variable set
    env::set_var("LOYVERSE_ACCESS_TOKEN", "env-token");
    env::set_var("LOYVERSE_API_BASE_URL", "http://localhost:9000/");
    env::set_var("LOYVERSE_API_VERSION", "v2");
    env::set_var("LOYVERSE_TIMEOUT_SECS", " 5 ");
    env::set_var("LOYVERSE_CONNECT_TIMEOUT_SECS", "2");
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url(), "http://localhost:9000/v2");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.connect_timeout, Duration::from_secs(2));
    let client = LoyverseClient::from_env().unwrap();
    assert_eq!(client.config().api_version, "v2");

    // Unparseable timeout
    env::set_var("LOYVERSE_TIMEOUT_SECS", "soon");
    match ClientConfig::from_env() {
        Err(Error::Config(message)) => assert!(message.contains("LOYVERSE_TIMEOUT_SECS")),
        other => panic!("expected Config error, got {:?}", other.map(|_| ())),
    }

    clear_env();
}
