//! Declared and held record state

use serde::{Deserialize, Serialize};

use dns_record_provider::Record;

/// Declared fields of a DNS record resource, as written in host configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordConfig {
    /// Zone the record belongs to. Only used to resolve the zone identifier.
    pub domain: String,
    /// Host label, relative to the zone or fully qualified.
    pub name: String,
    /// Record type. Immutable once the record exists.
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record content.
    pub value: String,
    /// Unset lets the remote service apply its default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

impl RecordConfig {
    /// A zero `ttl` or `priority` counts as unset.
    fn to_record(&self, proxied: Option<bool>) -> Record {
        Record {
            name: self.name.clone(),
            record_type: self.record_type.clone(),
            content: self.value.clone(),
            ttl: self.ttl.filter(|&ttl| ttl != 0),
            priority: self.priority.filter(|&priority| priority != 0),
            proxied,
            ..Record::default()
        }
    }

    /// Record sent on create: unset optional fields are left out entirely.
    pub fn to_create_record(&self) -> Record {
        self.to_record(self.proxied)
    }

    /// Record sent on update, a full replacement where an unset `proxied` means `false`.
    pub fn to_update_record(&self) -> Record {
        self.to_record(Some(self.proxied.unwrap_or(false)))
    }
}

/// Locally held state of a managed record.
///
/// An empty `id` means the record does not exist locally; every operation but
/// create requires one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    pub id: String,
    pub domain: String,
    pub name: String,
    /// Fully qualified name reported by the remote service.
    #[serde(default)]
    pub hostname: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default)]
    pub proxied: bool,
    #[serde(default)]
    pub zone_id: String,
}

impl ResourceData {
    /// State for a freshly created record, before it is reconciled.
    pub(crate) fn from_config(id: String, config: &RecordConfig) -> Self {
        Self {
            id,
            domain: config.domain.clone(),
            name: config.name.clone(),
            record_type: config.record_type.clone(),
            value: config.value.clone(),
            ttl: config.ttl,
            priority: config.priority,
            proxied: config.proxied.unwrap_or(false),
            ..Self::default()
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    /// Whether moving to `config` needs the record destroyed and recreated.
    pub fn requires_replacement(&self, config: &RecordConfig) -> bool {
        !self.is_new() && self.record_type != config.record_type
    }

    /// Overwrite every remote-derived field from `record`.
    ///
    /// `domain` and `name` are declared inputs and stay as they are.
    pub(crate) fn apply_record(&mut self, record: &Record) {
        self.hostname.clone_from(&record.name);
        self.record_type.clone_from(&record.record_type);
        self.value.clone_from(&record.content);
        self.ttl = record.ttl;
        self.priority = record.priority;
        self.proxied = record.proxied.unwrap_or(false);
        self.zone_id.clone_from(&record.zone_id);
    }
}
