//! Shared service plumbing for Veranda services.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
