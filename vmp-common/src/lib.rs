//! # VoiceMonkey Proxy Common Library
//!
//! Framework-free pieces of the relay:
//! - Secret loading (proxy key, upstream token)
//! - Caller authentication against the proxy key
//! - Configuration resolution (CLI / env / TOML / defaults)
//! - Common error type

pub mod api;
pub mod config;
pub mod error;
pub mod secret;

pub use error::{Error, Result};
pub use secret::load_secret;
