//! The `utils` module provides shared pieces used across the `hookbuf`
//! application: the process-level error type and logging initialization.

pub mod error;
pub mod logging;

pub use error::RelayError;
