//! Cloudflare v4 API client

mod client;
mod error;
mod http;
mod types;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::create_http_client;
use crate::types::{ClientOptions, ProviderCredentials};
use crate::utils::log_sanitizer::redact_secret;

pub(crate) use types::{CloudflareDnsRecord, CloudflareResponse, CloudflareZone, RecordBody};

/// Cloudflare Zones API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_ZONES: u32 = 50;
/// Cloudflare DNS Records API 单页最大记录数
pub(crate) const MAX_PAGE_SIZE_RECORDS: u32 = 100;

/// Cloudflare implementation of [`DnsClient`](crate::DnsClient).
pub struct CloudflareClient {
    pub(crate) client: Client,
    pub(crate) credentials: ProviderCredentials,
    pub(crate) api_base: String,
}

impl CloudflareClient {
    /// Client against the public Cloudflare endpoint with default timeouts.
    pub fn new(credentials: ProviderCredentials) -> Result<Self> {
        Self::with_options(credentials, &ClientOptions::default())
    }

    /// Client with explicit transport options (endpoint, timeouts).
    pub fn with_options(credentials: ProviderCredentials, options: &ClientOptions) -> Result<Self> {
        let client = create_http_client(options, "cloudflare")?;
        match &credentials {
            ProviderCredentials::Cloudflare { api_token } => log::debug!(
                "[cloudflare] client for {} using API token {}",
                options.api_base,
                redact_secret(api_token)
            ),
            ProviderCredentials::CloudflareGlobalKey { email, .. } => log::debug!(
                "[cloudflare] client for {} using global key of {email}",
                options.api_base
            ),
        }
        Ok(Self {
            client,
            credentials,
            api_base: options.api_base.clone(),
        })
    }
}
