//! REST surface of the platform
//!
//! The core only ever talks to the platform through the [`EntityApi`]
//! trait; [`PlatformClient`] is the reqwest-backed implementation. Retries,
//! if any, belong behind this boundary, not in the callers.

pub mod client;
pub mod models;
pub mod operations;
pub mod urls;

pub use client::{EntityApi, PlatformClient};
pub use models::PageResponse;
pub use operations::{Method, Operation};
