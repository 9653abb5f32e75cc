//! # hoo-adapter-bridge-http
//!
//! HTTP transport for talking to a lighting bridge.
//!
//! ## Responsibilities
//! - Implement the `BridgeTransport` port with a shared [`reqwest::Client`]
//! - Join the configured base URL with each request's path and query
//! - Treat any non-success status, timeout or network error as a transport
//!   failure; return the body verbatim otherwise
//!
//! ## Dependency rule
//! Same as other adapters: depends on `hoo-app` and `hoo-domain`.

pub mod config;
pub mod error;
mod transport;

pub use config::BridgeHttpConfig;
pub use error::BridgeHttpError;
pub use transport::HttpBridgeTransport;
