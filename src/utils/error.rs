//! The `error` module defines the process-level error type for `hookbuf`.
//!
//! Backpressure, an unreachable consumer and rejected credentials are not
//! errors: they are outcome values handled by the `relay` module. `RelayError`
//! only covers failures that stop the process or a client call, such as bad
//! configuration or a listener that cannot bind.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid listen address: {0}")]
    Address(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] hyper::Error),

    #[error("invalid request: {0}")]
    Request(#[from] hyper::http::Error),

    #[error("invalid url: {0}")]
    Url(#[from] hyper::http::uri::InvalidUri),

    #[error("poll rejected with status {0}")]
    PollRejected(hyper::StatusCode),

    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
