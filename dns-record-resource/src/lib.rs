//! DNS Record Resource Library
//!
//! Maps a declared DNS record onto a remote DNS service:
//! - record lifecycle (`RecordService`: create, read, update, delete)
//! - adoption of existing records by composite ID (`ImportService`)
//!
//! The remote service is reached only through the [`DnsClient`] trait, which
//! is injected into each service at construction.
//!
//! ```rust,no_run
//! use dns_record_resource::{RecordConfig, RecordService};
//! use dns_record_provider::{create_client, ProviderCredentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_client(ProviderCredentials::from_env()?)?;
//! let records = RecordService::new(client);
//!
//! let config = RecordConfig {
//!     domain: "example.com".to_string(),
//!     name: "www".to_string(),
//!     record_type: "A".to_string(),
//!     value: "192.0.2.1".to_string(),
//!     ..RecordConfig::default()
//! };
//! let state = records.create(&config).await?;
//! println!("created {} as {}", state.hostname, state.id);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod services;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use dns_record_provider::DnsClient;
pub use error::{ImportError, ResourceError, ResourceResult};
pub use services::{ImportService, RecordService};
pub use types::{ImportId, RecordConfig, ResourceData};
