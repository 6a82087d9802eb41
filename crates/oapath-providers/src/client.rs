//! Shared HTTP plumbing
//!
//! Uses async reqwest internally but presents a sync interface so the core
//! pipeline and rayon workers can call providers without carrying a
//! runtime. Rate limits (429) and server errors (5xx) are retried with
//! exponential backoff; everything else is a single attempt.

use std::sync::LazyLock;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_RETRIES: u32 = 3;
const BASE_DELAY: Duration = Duration::from_secs(1);

const USER_AGENT: &str = concat!("oapath/", env!("CARGO_PKG_VERSION"));

/// Error from a provider request.
#[derive(Debug)]
pub struct ApiError {
    pub status: Option<u16>,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(s) => write!(f, "HTTP {s}: {}", self.message),
            None => write!(f, "HTTP error: {}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    fn from_reqwest(e: &reqwest::Error) -> Self {
        Self {
            status: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.status, Some(429) | Some(500..=599))
    }
}

/// Shared async HTTP client with connection pooling.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(REQUEST_TIMEOUT)
        .pool_max_idle_per_host(4)
        .build()
        .expect("failed to build HTTP client")
});

/// Shared tokio runtime driving the sync-facing requests.
static SHARED_RUNTIME: LazyLock<tokio::runtime::Runtime> = LazyLock::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build tokio runtime")
});

/// HTTP GET returning the response body, with retry for 429/5xx.
pub fn api_get(
    url: &str,
    query: &[(&str, &str)],
    headers: &[(&str, &str)],
) -> Result<String, ApiError> {
    for attempt in 0..MAX_RETRIES {
        let result: Result<String, reqwest::Error> = SHARED_RUNTIME.handle().block_on(async {
            let mut request = SHARED_CLIENT.get(url).query(query);
            for (name, value) in headers {
                request = request.header(*name, *value);
            }
            let resp = request.send().await?.error_for_status()?;
            resp.text().await
        });

        match result {
            Ok(text) => return Ok(text),
            Err(e) => {
                let err = ApiError::from_reqwest(&e);
                if err.is_retryable() && attempt < MAX_RETRIES - 1 {
                    let delay = BASE_DELAY * 2u32.pow(attempt);
                    log::debug!(
                        "request failed (status {:?}), retry {}/{} in {delay:?}",
                        err.status,
                        attempt + 1,
                        MAX_RETRIES
                    );
                    std::thread::sleep(delay);
                } else {
                    return Err(err);
                }
            }
        }
    }
    Err(ApiError {
        status: None,
        message: format!("request failed after {MAX_RETRIES} retries"),
    })
}

/// GET + JSON parse; any failure is logged at debug and becomes `None`.
///
/// Providers that need to distinguish failure modes call [`api_get`]
/// directly; this is the common best-effort path.
pub fn api_get_json(
    url: &str,
    query: &[(&str, &str)],
    headers: &[(&str, &str)],
) -> Option<serde_json::Value> {
    let body = match api_get(url, query, headers) {
        Ok(body) => body,
        Err(e) => {
            log::debug!("GET {url} failed: {e}");
            return None;
        }
    };
    match serde_json::from_str(&body) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("GET {url} returned invalid JSON: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_and_server_errors_are_retryable() {
        for status in [429, 500, 503] {
            let err = ApiError {
                status: Some(status),
                message: String::new(),
            };
            assert!(err.is_retryable(), "status {status}");
        }
    }

    #[test]
    fn client_errors_are_not_retryable() {
        for status in [400, 403, 404] {
            let err = ApiError {
                status: Some(status),
                message: String::new(),
            };
            assert!(!err.is_retryable(), "status {status}");
        }
        let err = ApiError {
            status: None,
            message: "connect timeout".into(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn display_includes_status() {
        let err = ApiError {
            status: Some(404),
            message: "not found".into(),
        };
        assert_eq!(format!("{err}"), "HTTP 404: not found");
    }
}
