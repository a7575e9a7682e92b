//! Record value and type validation
//!
//! Runs before any remote call on create and update.

use std::net::{Ipv4Addr, Ipv6Addr};

use dns_record_provider::RecordType;

use crate::error::{ResourceError, ResourceResult};
use crate::types::RecordConfig;

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Parse a declared type string into a supported [`RecordType`].
pub fn parse_record_type(record_type: &str) -> ResourceResult<RecordType> {
    record_type
        .parse()
        .map_err(|_| ResourceError::UnsupportedRecordType {
            record_type: record_type.to_string(),
        })
}

/// Reject unknown types and `proxied = true` on types that cannot be proxied.
pub fn validate_record_type(record_type: &str, proxied: Option<bool>) -> ResourceResult<RecordType> {
    let parsed = parse_record_type(record_type)?;
    if proxied == Some(true) && !parsed.supports_proxy() {
        return Err(ResourceError::ProxyNotSupported {
            record_type: record_type.to_string(),
        });
    }
    Ok(parsed)
}

/// Check `value` has the content shape `record_type` requires.
///
/// Returns the reason the value was rejected.
pub fn validate_record_value(record_type: RecordType, value: &str) -> Result<(), String> {
    match record_type {
        RecordType::A => value
            .parse::<Ipv4Addr>()
            .map(|_| ())
            .map_err(|_| format!("'{value}' is not a valid IPv4 address")),
        RecordType::AAAA => value
            .parse::<Ipv6Addr>()
            .map(|_| ())
            .map_err(|_| format!("'{value}' is not a valid IPv6 address")),
        RecordType::CNAME | RecordType::MX | RecordType::NS => validate_hostname(value),
        RecordType::TXT | RecordType::SPF => {
            if value.chars().all(|c| c == ' ' || c.is_ascii_graphic()) {
                Ok(())
            } else {
                Err("value must contain printable ASCII characters only".to_string())
            }
        }
        RecordType::SRV | RecordType::LOC | RecordType::CAA => Ok(()),
    }
}

fn validate_hostname(value: &str) -> Result<(), String> {
    if value == "@" {
        return Ok(());
    }
    let host = value.strip_suffix('.').unwrap_or(value);
    if host.is_empty() {
        return Err("hostname must not be empty".to_string());
    }
    if host.len() > MAX_HOSTNAME_LEN {
        return Err(format!(
            "hostname is longer than {MAX_HOSTNAME_LEN} characters"
        ));
    }
    for label in host.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(format!(
                "'{value}' has a label that is empty or longer than {MAX_LABEL_LEN} characters"
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err(format!("label '{label}' starts or ends with a hyphen"));
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(format!("label '{label}' contains invalid characters"));
        }
    }
    Ok(())
}

/// Full pre-flight check of a declared record.
pub fn validate_config(config: &RecordConfig) -> ResourceResult<()> {
    let record_type = validate_record_type(&config.record_type, config.proxied)?;
    if config.priority.is_some() && !record_type.supports_priority() {
        return Err(ResourceError::PriorityNotSupported {
            record_type: config.record_type.clone(),
        });
    }
    validate_record_value(record_type, &config.value).map_err(|reason| {
        ResourceError::InvalidRecordValue {
            name: config.name.clone(),
            record_type: config.record_type.clone(),
            reason,
        }
    })
}
