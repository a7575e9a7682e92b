//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use dns_record_provider::RecordType;

// Re-export library error type
pub use dns_record_provider::ProviderError;

/// Comma-separated list of the record types accepted for management.
fn supported_types() -> String {
    RecordType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Resource layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ResourceError {
    /// The declared value does not have the shape its record type requires
    #[error("invalid value for {record_type} record '{name}': {reason}")]
    InvalidRecordValue {
        name: String,
        record_type: String,
        reason: String,
    },

    /// `proxied = true` on a type the edge cannot proxy
    #[error("{record_type} records cannot be proxied, only A, AAAA and CNAME records can")]
    ProxyNotSupported { record_type: String },

    /// `priority` set on a type without priority ordering
    #[error("{record_type} records do not take a priority, only MX and SRV records do")]
    PriorityNotSupported { record_type: String },

    #[error("unsupported record type '{record_type}', expected one of: {}", supported_types())]
    UnsupportedRecordType { record_type: String },

    /// An immutable field changed; the record has to be recreated
    #[error("changing {field} from '{from}' to '{to}' requires replacing the record")]
    ReplacementRequired {
        field: &'static str,
        from: String,
        to: String,
    },

    /// Operation other than create on a state without an identifier
    #[error("cannot {operation} a record that has no id")]
    MissingId { operation: &'static str },

    #[error("failed to resolve zone '{domain}': {source}")]
    ZoneResolution {
        domain: String,
        #[source]
        source: ProviderError,
    },

    #[error("record '{record_id}' not found in zone '{zone_id}'")]
    RecordNotFound { record_id: String, zone_id: String },

    /// Remote call failure, with the operation and identifiers involved
    #[error("failed to {operation} record ({context}): {source}")]
    Remote {
        operation: &'static str,
        context: String,
        #[source]
        source: ProviderError,
    },

    /// Create was accepted but the response carried no identifier
    #[error("failed to find record in create response for '{name}'")]
    EmptyRecordId { name: String },

    #[error(transparent)]
    Import(#[from] ImportError),
}

impl ResourceError {
    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidRecordValue { .. }
            | Self::ProxyNotSupported { .. }
            | Self::PriorityNotSupported { .. }
            | Self::UnsupportedRecordType { .. }
            | Self::ReplacementRequired { .. }
            | Self::MissingId { .. }
            | Self::RecordNotFound { .. } => true,
            Self::ZoneResolution { source, .. } | Self::Remote { source, .. } => {
                source.is_expected()
            }
            Self::Import(e) => e.is_expected(),
            Self::EmptyRecordId { .. } => false,
        }
    }

    /// Whether the remote record is gone, so a host may drop its local state.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::RecordNotFound { .. } => true,
            Self::Remote { source, .. } => source.is_record_not_found(),
            _ => false,
        }
    }
}

/// Errors resolving a composite import ID to a single record
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ImportError {
    #[error("invalid import id '{id}': {reason}, expected <domain>/<name>/<type>[/<index>]")]
    Malformed { id: String, reason: &'static str },

    #[error("import id '{id}' must end with a record index for MX records, e.g. example.com/mail/MX/0")]
    MissingIndex { id: String },

    #[error("invalid record index '{value}' in import id '{id}'")]
    InvalidIndex { id: String, value: String },

    #[error("failed to list zones while importing '{id}': {source}")]
    ListZones {
        id: String,
        #[source]
        source: ProviderError,
    },

    /// No zone named `domain` among the account's zones
    #[error("Unable to find record for ID: {id}. Checked {zones_checked} zones, none named '{domain}'")]
    ZoneNotFound {
        id: String,
        domain: String,
        zones_checked: usize,
    },

    /// The zone exists but holds no record with that name and type
    #[error("Unable to find record for ID: {id}. Checked {zones_checked} zones")]
    RecordNotFound { id: String, zones_checked: usize },

    #[error("Unable to find record index {index} for ID: {id}, only {matches} matching records")]
    IndexOutOfRange {
        id: String,
        index: usize,
        matches: usize,
    },
}

impl ImportError {
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ListZones { source, .. } => source.is_expected(),
            _ => true,
        }
    }
}

/// Resource layer Result type alias
pub type ResourceResult<T> = std::result::Result<T, ResourceError>;
