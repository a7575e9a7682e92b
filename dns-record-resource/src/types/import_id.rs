//! Composite import identifier: `<domain>/<name>/<type>[/<index>]`

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use dns_record_provider::{normalize_domain_name, qualify_name};

use crate::error::ImportError;

/// Segments may not be empty or contain '/'.
static IMPORT_ID_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([^/]+)/([^/]+)/([^/]+)(?:/([^/]+))?$").ok());

/// Parsed import identifier.
///
/// `index` selects among records sharing name and type, in the order the
/// remote service lists them. It is mandatory for MX and ignored for every
/// other type, which always resolves to the first match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportId {
    pub domain: String,
    pub name: String,
    pub record_type: String,
    pub index: Option<usize>,
}

impl ImportId {
    /// Record name as the remote service reports it, lower-cased.
    pub fn qualified_name(&self) -> String {
        qualify_name(
            &self.name.to_ascii_lowercase(),
            &self.domain.to_ascii_lowercase(),
        )
    }

    pub fn index(&self) -> usize {
        self.index.unwrap_or(0)
    }
}

impl FromStr for ImportId {
    type Err = ImportError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let malformed = |reason| ImportError::Malformed {
            id: id.to_string(),
            reason,
        };

        let pattern = IMPORT_ID_PATTERN
            .as_ref()
            .ok_or_else(|| malformed("import id pattern unavailable"))?;
        let caps = pattern
            .captures(id.trim())
            .ok_or_else(|| malformed("wrong number of segments or an empty segment"))?;

        let domain = normalize_domain_name(&caps[1]);
        let name = caps[2].to_string();
        let record_type = caps[3].to_string();
        let raw_index = caps.get(4).map(|m| m.as_str());

        let index = if record_type == "MX" {
            let value = raw_index.ok_or_else(|| ImportError::MissingIndex { id: id.to_string() })?;
            let index = value.parse::<usize>().map_err(|_| ImportError::InvalidIndex {
                id: id.to_string(),
                value: value.to_string(),
            })?;
            Some(index)
        } else {
            if let Some(value) = raw_index {
                log::warn!(
                    "Ignoring index '{value}' in import id '{id}': only MX records are selected by index"
                );
            }
            None
        };

        Ok(Self {
            domain,
            name,
            record_type,
            index,
        })
    }
}

impl fmt::Display for ImportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.domain, self.name, self.record_type)?;
        if let Some(index) = self.index {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}
