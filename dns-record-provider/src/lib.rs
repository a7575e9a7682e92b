//! # dns-record-provider
//!
//! Typed async client for the DNS records of a Cloudflare account: zone lookup,
//! record listing and record create/read/replace/delete.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_record_provider::{create_client, ProviderCredentials, RecordFilter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = create_client(ProviderCredentials::from_env()?)?;
//!
//!     let zone_id = client.resolve_zone_id("example.com").await?;
//!     let records = client
//!         .list_records(&zone_id, &RecordFilter::by_type("A"))
//!         .await?;
//!     for record in &records {
//!         println!("{} {} -> {}", record.name, record.record_type, record.content);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). API error
//! codes and HTTP statuses are mapped to structured variants such as
//! [`ProviderError::RecordNotFound`] or [`ProviderError::InvalidCredentials`].
//! Nothing is retried; transient failures (`NetworkError`, `Timeout`,
//! `RateLimited`) are reported to the caller unchanged.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

pub use error::{ProviderError, Result};

pub use factory::{create_client, create_client_with_options};

// Core trait only (internal traits are not exported)
pub use traits::DnsClient;

pub use types::{
    ClientOptions, CredentialValidationError, DEFAULT_API_BASE, ENV_API_BASE_URL, ENV_API_KEY,
    ENV_API_TOKEN, ENV_EMAIL, ProviderCredentials, Record, RecordFilter, RecordType, Zone,
};

pub use providers::CloudflareClient;
pub use providers::common::{normalize_domain_name, qualify_name, strip_zone_suffix};
