//! API module for shared HTTP API functionality
//!
//! Contains ONLY pure functions and shared constants. The proxy binary wraps
//! these with framework-specific middleware (Axum).

pub mod auth;

pub use auth::{authenticate, PROXY_KEY_HEADER};
