//! # hoo-domain
//!
//! Pure domain model for the hoo light controller.
//!
//! ## Responsibilities
//! - Foundational types: bridge-assigned light numbers, error conventions
//! - Define **light state** (on/off, hue, saturation, brightness, …) and the
//!   attribute ranges every mutation is checked against
//! - Convert RGB colours onto the bridge's hue/saturation/brightness scales
//! - Define **motion sensor state** (presence)
//! - Define **animation requests** (rotate, random, sleepy, stop)
//! - Define the wire records exchanged with a bridge
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod animation;
pub mod color;
pub mod light;
pub mod motion;
