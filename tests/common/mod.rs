//! Shared setup for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use loyverse_rs::{ClientConfig, LoyverseClient, RetryConfig};
use tracing_subscriber::EnvFilter;
use wiremock::{MockServer, Request, ResponseTemplate};

static INIT: Once = Once::new();

pub const TOKEN: &str = "test-token";

/// Initialize logging for tests
pub fn init_logging() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Retry policy with millisecond backoff so tests stay fast.
pub fn fast_retry() -> RetryConfig {
    RetryConfig::default().with_initial_backoff(Duration::from_millis(1))
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(TOKEN)
        .with_api_base_url(server.uri())
        .with_retry(fast_retry())
}

/// Client pointed at the mock server.
pub fn client_for(server: &MockServer) -> LoyverseClient {
    init_logging();
    LoyverseClient::new(config_for(server)).unwrap()
}

/// Responder that plays `failures` then `success`, counting calls.
pub fn fail_then(
    failures: Vec<ResponseTemplate>,
    success: ResponseTemplate,
) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync + 'static {
    let calls = Arc::new(AtomicUsize::new(0));
    move |_req: &Request| {
        let current = calls.fetch_add(1, Ordering::SeqCst);
        failures.get(current).cloned().unwrap_or_else(|| success.clone())
    }
}
