//! Shared helpers for the integration tests.

#![allow(dead_code)]

use httpmock::MockServer;
use open_to_close::{ClientConfig, OpenToCloseApi};
use tracing_subscriber::EnvFilter;

pub const TEST_API_KEY: &str = "test-api-key";

/// Route library logs to the test output when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A client pointed at the given mock server.
pub fn api_for(server: &MockServer) -> OpenToCloseApi {
    init_tracing();
    let config = ClientConfig::new(TEST_API_KEY)
        .unwrap()
        .with_base_url(&server.base_url())
        .unwrap();
    OpenToCloseApi::from_config(config).unwrap()
}
