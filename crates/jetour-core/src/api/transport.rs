//! HTTP transport seam and its libcurl implementation.

use std::fmt;
use std::time::Duration;

use super::endpoints;
use crate::config::HttpConfig;
use crate::error::WorkerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Put,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
        })
    }
}

/// One fully built request: absolute URL with query string, optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a single request. Network failures map to `WorkerError::Transport`;
/// the HTTP status is returned as-is for the caller to judge.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, WorkerError>;
}

/// Blocking transport built on a fresh curl easy handle per request.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    headers: Vec<(String, String)>,
    timeout: Duration,
    connect_timeout: Duration,
}

impl CurlTransport {
    pub fn new(timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            headers: endpoints::default_headers(),
            timeout,
            connect_timeout,
        }
    }

    pub fn from_config(cfg: &HttpConfig) -> Self {
        Self::new(cfg.timeout(), cfg.connect_timeout())
    }
}

impl Transport for CurlTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, WorkerError> {
        // The query string carries the access token; only log the path part.
        let display_url = request.url.split('?').next().unwrap_or_default();
        tracing::debug!(method = %request.method, url = display_url, "sending request");

        let mut body = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(&request.url)?;
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        // Empty string = advertise every encoding libcurl can decode.
        easy.accept_encoding("")?;

        match request.method {
            Method::Get => easy.get(true)?,
            Method::Post | Method::Put => {
                easy.post(true)?;
                easy.post_fields_copy(request.body.as_deref().unwrap_or_default())?;
                if request.method == Method::Put {
                    easy.custom_request("PUT")?;
                }
            }
        }

        let mut list = curl::easy::List::new();
        for (k, v) in &self.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!(status, bytes = body.len(), url = display_url, "response received");
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        let ok = ApiResponse {
            status: 204,
            body: Vec::new(),
        };
        let bad = ApiResponse {
            status: 302,
            body: Vec::new(),
        };
        assert!(ok.is_success());
        assert!(!bad.is_success());
    }

    #[test]
    fn method_display() {
        assert_eq!(Method::Put.to_string(), "PUT");
    }
}
