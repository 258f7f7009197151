use std::{sync::OnceLock, time::Duration};

use reqwest::Client;

/// Timeout applied when the configuration names none
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Pooled HTTP client shared by every upstream call
///
/// The first caller fixes the timeout; configuration is read once at
/// startup so later callers pass the same value.
pub fn http_client(timeout: Option<Duration>) -> Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();

    CLIENT
        .get_or_init(|| {
            let mut headers = http::HeaderMap::new();
            headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

            Client::builder()
                .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
                .pool_idle_timeout(Some(Duration::from_secs(5)))
                .tcp_nodelay(true)
                .default_headers(headers)
                .build()
                .expect("Failed to build default HTTP client")
        })
        .clone()
}
