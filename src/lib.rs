//! # hookbuf
//!
//! `hookbuf` is a store-and-forward webhook relay. External senders post
//! notifications to a public endpoint; an internal consumer collects them by
//! polling a second, authenticated endpoint. The relay keeps messages in
//! memory only and signals backpressure with retry-inducing status codes, so
//! at-least-once delivery comes from the senders' own retries.
//!
//! ## Core Modules
//!
//! - `buffer`: the capacity-bounded message buffer.
//! - `liveness`: consumer reachability, marked alive by polls and expired by a
//!   background monitor.
//! - `relay`: the accept/retry protocol and retrieval, independent of HTTP.
//! - `transport`: the public and internal HTTP listeners.
//! - `client`: a poll client for the internal endpoint.
//! - `config`: loading and validating settings.
//! - `utils`: the error type and logging setup.

pub mod buffer;
pub mod client;
pub mod config;
pub mod liveness;
pub mod relay;
pub mod transport;
pub mod utils;
