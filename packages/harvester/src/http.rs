//! HTTP client wrapper for the registry export and wiki lookups.

use std::io::Read;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::{HarvesterConfig, DEFAULT_MAX_RESPONSE_SIZE};
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("ovm-harvester/", env!("CARGO_PKG_VERSION"));

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Create a configured HTTP client.
pub fn create_client(config: &HarvesterConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download content from a URL, retrying transient failures.
///
/// Connection errors, timeouts and 5xx responses are retried with
/// exponential backoff until `max_attempts` is reached. Client errors (4xx)
/// fail immediately. `max_attempts = 1` performs a single request.
///
/// # Returns
/// Raw bytes of the response body
pub fn download_bytes(client: &Client, url: &str, max_attempts: u32) -> Result<Vec<u8>> {
    let max_attempts = max_attempts.max(1);
    let mut last_error: Option<String> = None;

    for attempt in 0..max_attempts {
        if attempt > 0 {
            // 500ms, 1000ms, 2000ms, ...
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();

                if status.is_server_error() {
                    tracing::warn!(
                        status = %status,
                        attempt = attempt + 1,
                        max_attempts,
                        "Server error"
                    );
                    last_error = Some(format!("Server error: {status}"));
                    continue;
                }

                let response = response.error_for_status().map_err(|source| {
                    HarvesterError::Download {
                        url: url.to_string(),
                        source,
                    }
                })?;

                if let Some(size) = response.content_length() {
                    check_size(url, size)?;
                }

                return read_limited(response, url, DEFAULT_MAX_RESPONSE_SIZE);
            }
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_attempts,
                        "Connection error"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                return Err(HarvesterError::Download {
                    url: url.to_string(),
                    source: e,
                });
            }
        }
    }

    Err(HarvesterError::RetriesExhausted {
        attempts: max_attempts,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

fn check_size(url: &str, size: u64) -> Result<()> {
    if size > DEFAULT_MAX_RESPONSE_SIZE {
        return Err(HarvesterError::ResponseTooLarge {
            url: url.to_string(),
            size,
            limit: DEFAULT_MAX_RESPONSE_SIZE,
        });
    }
    Ok(())
}

/// Read a body of at most `limit` bytes.
///
/// Reads through `take(limit + 1)`, so a body without `Content-Length` never
/// buffers more than one byte past the limit before it is rejected.
fn read_limited(reader: impl Read, url: &str, limit: u64) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut buf)?;

    let size = buf.len() as u64;
    if size > limit {
        return Err(HarvesterError::ResponseTooLarge {
            url: url.to_string(),
            size,
            limit,
        });
    }
    Ok(buf)
}

/// Decode a response body as UTF-8, replacing invalid sequences.
pub fn bytes_to_string(bytes: &[u8], what: &str) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Invalid UTF-8 in {what}, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client(&HarvesterConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_bytes_to_string_valid() {
        assert_eq!(bytes_to_string("Žďár".as_bytes(), "test"), "Žďár");
    }

    #[test]
    fn test_bytes_to_string_lossy() {
        let bytes = [b'a', 0xff, b'b'];
        assert_eq!(bytes_to_string(&bytes, "test"), "a\u{fffd}b");
    }

    #[test]
    fn test_read_limited_within_limit() {
        let body = read_limited(&b"<SeznamOvmIndex/>"[..], "http://x", 17).unwrap();
        assert_eq!(body, b"<SeznamOvmIndex/>");
    }

    #[test]
    fn test_read_limited_stops_past_limit() {
        let mut reader = std::io::repeat(b'x').take(1_000_000);
        let err = read_limited(&mut reader, "http://x", 16).unwrap_err();

        assert!(matches!(
            err,
            HarvesterError::ResponseTooLarge {
                size: 17,
                limit: 16,
                ..
            }
        ));
        // Only limit + 1 bytes were pulled from the source
        assert_eq!(reader.limit(), 1_000_000 - 17);
    }

    #[test]
    fn test_check_size() {
        assert!(check_size("http://x", 10).is_ok());
        assert!(matches!(
            check_size("http://x", DEFAULT_MAX_RESPONSE_SIZE + 1),
            Err(HarvesterError::ResponseTooLarge { .. })
        ));
    }
}
