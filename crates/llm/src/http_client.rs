//! HTTP Client Factory
//!
//! Provides a factory function for building reqwest clients with a request deadline.

use std::time::Duration;

use crate::types::{LlmError, LlmResult};

/// Connection establishment deadline, independent of the per-call timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build a `reqwest::Client`.
///
/// - `Some(timeout)` -> every request fails once the deadline elapses
/// - `None` -> no request deadline; callers impose their own
pub fn build_http_client(timeout: Option<Duration>) -> LlmResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().connect_timeout(CONNECT_TIMEOUT);
    if let Some(limit) = timeout {
        builder = builder.timeout(limit);
    }
    builder.build().map_err(|e| LlmError::Other {
        message: format!("failed to build HTTP client: {}", e),
    })
}
