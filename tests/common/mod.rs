// Shared setup for the live suites. They talk to the service named by
// API_BASE_URL (see .env.example) and are ignored by default:
//
//     cargo test -- --ignored

#![allow(dead_code)]

use std::sync::Once;

use booker_api::ApiSession;
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("booker_api=info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

// Fresh session per test, so every test starts with an empty token cache
pub fn session() -> anyhow::Result<ApiSession> {
    init_tracing();
    Ok(ApiSession::from_env()?)
}
