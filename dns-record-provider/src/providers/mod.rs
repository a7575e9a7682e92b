//! Remote DNS client implementations

/// Shared utilities used by client implementations.
pub mod common;

mod cloudflare;

pub use cloudflare::CloudflareClient;
