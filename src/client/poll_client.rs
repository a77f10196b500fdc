//! Poll client
//!
//! Issues one retrieval request against the internal surface and splits the
//! newline-framed response into individual messages. A poll drains the
//! relay, so every message returned here is gone from the server.

use hyper::client::HttpConnector;
use hyper::{Body, Client, Method, Request, StatusCode, Uri};

use crate::transport::AUTH_HEADER;
use crate::utils::error::RelayError;

/// Result of one poll.
#[derive(Debug)]
pub struct PollResponse {
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl PollResponse {
    pub fn from_payload(status: StatusCode, payload: &str) -> Self {
        Self {
            status,
            messages: split_payload(payload),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PollClient {
    http: Client<HttpConnector>,
    url: Uri,
    token: String,
}

impl PollClient {
    /// `url` is the full internal retrieval URL, e.g.
    /// `http://127.0.0.1:8081/internal/api/hooks`.
    pub fn new(url: &str, token: impl Into<String>) -> Result<Self, RelayError> {
        Ok(Self {
            http: Client::new(),
            url: url.parse()?,
            token: token.into(),
        })
    }

    pub async fn poll(&self) -> Result<PollResponse, RelayError> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(self.url.clone())
            .header(AUTH_HEADER, self.token.as_str())
            .body(Body::empty())?;

        let response = self.http.request(request).await?;
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await?;

        Ok(PollResponse::from_payload(
            status,
            &String::from_utf8_lossy(&bytes),
        ))
    }
}

/// Splits a retrieval payload into message bodies, dropping the trailing
/// separator.
pub fn split_payload(payload: &str) -> Vec<String> {
    payload
        .split('\n')
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
