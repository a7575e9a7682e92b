//! Client factory functions.

use std::sync::Arc;

use crate::error::Result;
use crate::providers::CloudflareClient;
use crate::traits::DnsClient;
use crate::types::{ClientOptions, ProviderCredentials};

/// Creates a [`DnsClient`] against the public Cloudflare endpoint.
///
/// The returned client is wrapped in `Arc<dyn DnsClient>` for easy sharing
/// across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use dns_record_provider::{create_client, ProviderCredentials};
///
/// let client = create_client(ProviderCredentials::Cloudflare {
///     api_token: "your-token".to_string(),
/// }).unwrap();
/// ```
pub fn create_client(credentials: ProviderCredentials) -> Result<Arc<dyn DnsClient>> {
    create_client_with_options(credentials, &ClientOptions::default())
}

/// Creates a [`DnsClient`] with explicit transport options.
pub fn create_client_with_options(
    credentials: ProviderCredentials,
    options: &ClientOptions,
) -> Result<Arc<dyn DnsClient>> {
    Ok(Arc::new(CloudflareClient::with_options(credentials, options)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_returns_cloudflare_client() {
        let client = create_client(ProviderCredentials::CloudflareGlobalKey {
            email: "ops@example.com".to_string(),
            api_key: "key".to_string(),
        })
        .unwrap();
        assert_eq!(client.id(), "cloudflare");
    }
}
