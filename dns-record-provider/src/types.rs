use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

// ============ Zone / Record ============

/// A DNS zone visible to the authenticated account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-assigned zone identifier.
    pub id: String,
    /// Zone apex name, e.g. `example.com`.
    pub name: String,
    /// Provider-reported zone status (`active`, `pending`, ...).
    pub status: String,
}

/// A single DNS record as exchanged with the remote service.
///
/// `record_type` is kept as the provider's raw string so that records of types
/// not modelled by [`RecordType`] still round-trip through reads and listings.
/// `ttl`, `priority` and `proxied` are optional: `None` is omitted from request
/// bodies so the remote service applies its own default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Record identifier; empty on records that have not been created yet.
    #[serde(default)]
    pub id: String,
    /// Identifier of the zone that owns the record.
    #[serde(default)]
    pub zone_id: String,
    /// Name of the zone that owns the record.
    #[serde(default)]
    pub zone_name: String,
    /// Record name. Fully qualified on records returned by the service.
    pub name: String,
    /// Record type, e.g. `A` or `MX`.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record content; its shape depends on the type.
    pub content: String,
    /// Time to live in seconds (`1` means automatic on Cloudflare).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    /// Priority for types that support ordering (MX, SRV).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    /// Whether traffic is routed through the provider's edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    /// Whether the service would allow this record to be proxied.
    #[serde(default)]
    pub proxiable: bool,
    /// Creation timestamp reported by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    /// Last modification timestamp reported by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Server-side filter for record listings.
///
/// The remote filter is coarse; callers that need exact matching must
/// re-check the returned records themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Only return records of this type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    /// Only return records with this (fully qualified) name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Only return records with this content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl RecordFilter {
    /// Filter on record type only.
    pub fn by_type(record_type: impl Into<String>) -> Self {
        Self {
            record_type: Some(record_type.into()),
            ..Self::default()
        }
    }
}

// ============ Record Type ============

/// DNS record types accepted for management.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    TXT,
    NS,
    SRV,
    LOC,
    SPF,
    CAA,
}

impl RecordType {
    /// Every supported type, in the order they are listed in error messages.
    pub const ALL: [Self; 10] = [
        Self::A,
        Self::AAAA,
        Self::CNAME,
        Self::TXT,
        Self::SRV,
        Self::LOC,
        Self::MX,
        Self::NS,
        Self::SPF,
        Self::CAA,
    ];

    /// Upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::AAAA => "AAAA",
            Self::CNAME => "CNAME",
            Self::MX => "MX",
            Self::TXT => "TXT",
            Self::NS => "NS",
            Self::SRV => "SRV",
            Self::LOC => "LOC",
            Self::SPF => "SPF",
            Self::CAA => "CAA",
        }
    }

    /// Only address and alias records can be proxied through the edge.
    pub fn supports_proxy(self) -> bool {
        matches!(self, Self::A | Self::AAAA | Self::CNAME)
    }

    /// Types whose records carry a priority value.
    pub fn supports_priority(self) -> bool {
        matches!(self, Self::MX | Self::SRV)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ProviderError::UnsupportedRecordType {
                provider: "dns-record".to_string(),
                record_type: s.to_string(),
            })
    }
}

// ============ Credential Types ============

/// Validation error for client credentials.
///
/// Returned when credential fields are missing or empty.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CredentialValidationError {
    /// A required credential field is missing entirely.
    MissingField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
    /// A credential field is present but empty/whitespace-only.
    EmptyField {
        /// Machine-readable field key.
        field: String,
        /// Human-readable field label.
        label: String,
    },
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { label, .. } => write!(f, "Missing required field: {label}"),
            Self::EmptyField { label, .. } => write!(f, "Field must not be empty: {label}"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Environment variable holding a scoped API token.
pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
/// Environment variable holding the account e-mail for global-key auth.
pub const ENV_EMAIL: &str = "CLOUDFLARE_EMAIL";
/// Environment variable holding the global API key.
pub const ENV_API_KEY: &str = "CLOUDFLARE_API_KEY";
/// Environment variable overriding the API base URL.
pub const ENV_API_BASE_URL: &str = "CLOUDFLARE_API_BASE_URL";

/// Credentials for the Cloudflare API.
///
/// Serialized as a tagged enum:
///
/// ```json
/// { "auth": "api_token", "credentials": { "api_token": "..." } }
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "auth", content = "credentials")]
pub enum ProviderCredentials {
    /// Scoped API token, sent as a Bearer token.
    #[serde(rename = "api_token")]
    Cloudflare {
        /// Cloudflare API token.
        api_token: String,
    },

    /// Account e-mail plus global API key, sent as `X-Auth-Email` / `X-Auth-Key`.
    #[serde(rename = "global_key")]
    CloudflareGlobalKey {
        /// Account e-mail address.
        email: String,
        /// Global API key.
        api_key: String,
    },
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cloudflare { .. } => f
                .debug_struct("Cloudflare")
                .field("api_token", &"<redacted>")
                .finish(),
            Self::CloudflareGlobalKey { email, .. } => f
                .debug_struct("CloudflareGlobalKey")
                .field("email", email)
                .field("api_key", &"<redacted>")
                .finish(),
        }
    }
}

impl ProviderCredentials {
    /// Construct credentials from a `HashMap`, validating required fields.
    ///
    /// `apiToken` takes precedence; otherwise both `email` and `apiKey` are required.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, CredentialValidationError> {
        if map.contains_key("apiToken") {
            return Ok(Self::Cloudflare {
                api_token: Self::get_required_field(map, "apiToken", "API Token")?,
            });
        }
        Ok(Self::CloudflareGlobalKey {
            email: Self::get_required_field(map, "email", "Email")?,
            api_key: Self::get_required_field(map, "apiKey", "Global API Key")?,
        })
    }

    /// Read credentials from `CLOUDFLARE_API_TOKEN`, or from
    /// `CLOUDFLARE_EMAIL` + `CLOUDFLARE_API_KEY`.
    pub fn from_env() -> Result<Self, CredentialValidationError> {
        let map: HashMap<String, String> = [
            (ENV_API_TOKEN, "apiToken"),
            (ENV_EMAIL, "email"),
            (ENV_API_KEY, "apiKey"),
        ]
        .into_iter()
        .filter_map(|(var, key)| std::env::var(var).ok().map(|v| (key.to_string(), v)))
        .collect();
        Self::from_map(&map)
    }

    /// Obtain required fields from `HashMap` and verify that it is not empty
    fn get_required_field(
        map: &HashMap<String, String>,
        key: &str,
        label: &str,
    ) -> Result<String, CredentialValidationError> {
        match map.get(key) {
            None => Err(CredentialValidationError::MissingField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) if v.trim().is_empty() => Err(CredentialValidationError::EmptyField {
                field: key.to_string(),
                label: label.to_string(),
            }),
            Some(v) => Ok(v.clone()),
        }
    }

    /// Convert credentials to a `HashMap` for flat key-value storage.
    pub fn to_map(&self) -> HashMap<String, String> {
        match self {
            Self::Cloudflare { api_token } => [("apiToken".to_string(), api_token.clone())].into(),
            Self::CloudflareGlobalKey { email, api_key } => [
                ("email".to_string(), email.clone()),
                ("apiKey".to_string(), api_key.clone()),
            ]
            .into(),
        }
    }
}

// ============ Client Options ============

/// Default Cloudflare v4 API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";
/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Transport options for the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// API base URL without a trailing slash.
    pub api_base: String,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientOptions {
    /// Defaults, with `CLOUDFLARE_API_BASE_URL` overriding the endpoint when set.
    pub fn from_env() -> Self {
        match std::env::var(ENV_API_BASE_URL) {
            Ok(base) if !base.trim().is_empty() => Self::default().with_api_base(base),
            _ => Self::default(),
        }
    }

    /// Replace the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}
