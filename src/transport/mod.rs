//! The `transport` module exposes the relay over HTTP.
//!
//! It defines the two listener surfaces, maps requests on each surface onto
//! the relay's ingestion and retrieval operations, and runs both listeners
//! together with the liveness expiry monitor.

pub mod http;
pub mod server;
pub mod surface;

pub use server::RelayServer;
pub use surface::{AUTH_HEADER, INTERNAL_PREFIX, PUBLIC_PREFIX, Surface};
