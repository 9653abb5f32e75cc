//! # hoo-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Expose a [`VirtualBridge`](hoo_adapter_virtual::VirtualBridge) under the
//!   same path shapes a hardware bridge answers (`/lights`, `/{n}/on`,
//!   `/{n}/state?bri=..`, `/rotate/{t}/{h}`, …), nested below `/api`
//! - Map path and query parameters into bridge calls (driving adapter)
//! - Map bridge results into JSON responses and errors into `{ "error": .. }`
//!
//! Every route is a `GET`, matching what the bridge transport sends.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
