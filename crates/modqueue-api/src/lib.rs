//! # modqueue-api
//!
//! Wire-level client for the modqueue moderation backend.
//!
//! This crate provides:
//! - Serde DTOs matching the backend's JSON (`wire`)
//! - An HTTP client covering every backend endpoint (`ApiClient`)
//! - Typed errors that preserve the backend's error descriptions
//!
//! Domain modelling and paging orchestration live in `modqueue-core`;
//! this crate only speaks the wire format.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
pub mod wire;

pub use client::{ApiClient, ReviewDecision};
pub use error::{Error, Result};
