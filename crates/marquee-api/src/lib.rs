//! Typed client for the movie-recommendation backend.
//!
//! One read operation per feed kind plus the two model-management
//! operations. The client is a thin, best-effort wrapper: no caching,
//! no retries — resilience policy belongs to the caller.

pub mod client;
pub mod error;
pub mod types;

pub use client::RecClient;
pub use error::ApiError;
