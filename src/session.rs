// src/session.rs
use crate::error::{DiscoveryError, ReadFailure, Result};
use crate::types::{Config, RawResponse};
use log::{debug, warn};
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::error::Error as _;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// HTTP transport shared by every call on a client. Cloning is cheap.
#[derive(Clone)]
pub struct Session {
    client: Client,
    user_agent: Arc<str>,
}

impl Session {
    pub fn new(config: &Config) -> Result<Self> {
        let mut client_builder = Client::builder()
            .timeout(config.timeout)
            .gzip(true)
            .deflate(true)
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| DiscoveryError::Config(format!("Invalid proxy URL: {}", e)))?;
            client_builder = client_builder.proxy(proxy);
        }

        let client = client_builder
            .build()
            .map_err(|e| DiscoveryError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Session {
            client,
            user_agent: Arc::from(config.user_agent.as_str()),
        })
    }

    /// Wraps a caller-built client. The user agent is still sent on every request.
    pub fn with_client(client: Client, user_agent: &str) -> Self {
        Session {
            client,
            user_agent: Arc::from(user_agent),
        }
    }

    /// POSTs `body` as JSON and reads the whole response into memory.
    ///
    /// Non-2xx statuses are not errors here. Failures after the status line carry
    /// the partially captured response.
    pub async fn post_json<T>(
        &self,
        url: &Url,
        body: &T,
        cancel: &CancellationToken,
    ) -> Result<RawResponse>
    where
        T: Serialize + ?Sized,
    {
        let payload = serde_json::to_vec(body)?;

        let request = self
            .client
            .post(url.clone())
            .header(USER_AGENT, &*self.user_agent)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json, application/xml")
            .body(payload);

        debug!("POST {}", url);

        let mut response = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Request to {} canceled before a response arrived", url);
                return Err(DiscoveryError::Read { cause: ReadFailure::Canceled, response: None });
            }
            sent = request.send() => sent.map_err(|e| DiscoveryError::Read {
                cause: ReadFailure::Transport(e.to_string()),
                response: None,
            })?,
        };

        let status = response.status();
        let headers = response.headers().clone();
        let declared = response.content_length();
        let mut captured = Vec::with_capacity(declared.unwrap_or(0).min(1 << 20) as usize);

        loop {
            let chunk = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!("Request to {} canceled after {} bytes", url, captured.len());
                    return Err(read_error(ReadFailure::Canceled, status, headers, captured));
                }
                chunk = response.chunk() => chunk,
            };

            match chunk {
                Ok(Some(bytes)) => captured.extend_from_slice(&bytes),
                Ok(None) => break,
                Err(e) => {
                    let cause = match declared {
                        Some(len) if (captured.len() as u64) < len && closed_early(&e) => {
                            warn!(
                                "Body from {} ended at {} of {} declared bytes",
                                url,
                                captured.len(),
                                len
                            );
                            ReadFailure::UnexpectedEof
                        }
                        _ => ReadFailure::Transport(e.to_string()),
                    };
                    return Err(read_error(cause, status, headers, captured));
                }
            }
        }

        debug!("{} answered {} with {} bytes", url, status, captured.len());

        Ok(RawResponse {
            status,
            headers,
            body: captured,
        })
    }
}

/// True when the body stream failed because the peer stopped sending, not
/// because of a timeout or a reset connection.
fn closed_early(e: &reqwest::Error) -> bool {
    if e.is_timeout() || e.is_connect() {
        return false;
    }

    let mut source = e.source();
    while let Some(err) = source {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::TimedOut | io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted
            ) {
                return false;
            }
        }
        source = err.source();
    }

    true
}

fn read_error(cause: ReadFailure, status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> DiscoveryError {
    DiscoveryError::Read {
        cause,
        response: Some(Box::new(RawResponse { status, headers, body })),
    }
}
