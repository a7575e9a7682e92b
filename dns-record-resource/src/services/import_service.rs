//! 通过组合 ID 导入已有记录

use std::sync::Arc;

use dns_record_provider::{DnsClient, RecordFilter, normalize_domain_name, strip_zone_suffix};

use crate::error::{ImportError, ResourceError, ResourceResult};
use crate::services::log_failure;
use crate::types::{ImportId, ResourceData};

/// Adopts an existing remote record by its `<domain>/<name>/<type>[/<index>]` ID.
pub struct ImportService {
    client: Arc<dyn DnsClient>,
}

impl ImportService {
    #[must_use]
    pub fn new(client: Arc<dyn DnsClient>) -> Self {
        Self { client }
    }

    /// Resolve `id` to exactly one record and return its state.
    ///
    /// Zones are scanned in service order and the first one named like the
    /// domain wins. Names compare case-insensitively. Matching records keep the order the service lists them
    /// in, which is what the index selects on.
    pub async fn import(&self, id: &str) -> ResourceResult<ResourceData> {
        self.try_import(id)
            .await
            .inspect_err(|e| log_failure("import", e))
    }

    async fn try_import(&self, id: &str) -> ResourceResult<ResourceData> {
        let import_id: ImportId = id.parse()?;

        let zones = self
            .client
            .list_zones()
            .await
            .map_err(|source| ImportError::ListZones {
                id: id.to_string(),
                source,
            })?;

        let mut zones_checked = 0;
        let zone = zones.iter().find(|z| {
            zones_checked += 1;
            normalize_domain_name(&z.name).eq_ignore_ascii_case(&import_id.domain)
        });
        let Some(zone) = zone else {
            return Err(ImportError::ZoneNotFound {
                id: id.to_string(),
                domain: import_id.domain,
                zones_checked,
            }
            .into());
        };
        log::debug!(
            "Import '{id}' matched zone {} after checking {zones_checked} zones",
            zone.id
        );

        let records = self
            .client
            .list_records(&zone.id, &RecordFilter::by_type(&import_id.record_type))
            .await
            .map_err(|source| ResourceError::Remote {
                operation: "list",
                context: format!("zone {}, type {}", zone.id, import_id.record_type),
                source,
            })?;

        // 远端过滤较粗，名称和类型需要精确比对
        let wanted = import_id.qualified_name();
        let matches: Vec<_> = records
            .into_iter()
            .filter(|r| {
                normalize_domain_name(&r.name).eq_ignore_ascii_case(&wanted)
                    && r.record_type == import_id.record_type
            })
            .collect();

        if matches.is_empty() {
            return Err(ImportError::RecordNotFound {
                id: id.to_string(),
                zones_checked: zones.len(),
            }
            .into());
        }

        let index = import_id.index();
        let Some(record) = matches.get(index) else {
            return Err(ImportError::IndexOutOfRange {
                id: id.to_string(),
                index,
                matches: matches.len(),
            }
            .into());
        };

        if import_id.index.is_none() && matches.len() > 1 {
            log::warn!(
                "{} {} records named '{wanted}' exist, importing the first; only MX records can be selected by index",
                matches.len(),
                import_id.record_type
            );
        }

        let mut state = ResourceData {
            id: record.id.clone(),
            domain: zone.name.clone(),
            name: strip_zone_suffix(&record.name, &zone.name),
            ..ResourceData::default()
        };
        state.apply_record(record);
        if state.zone_id.is_empty() {
            state.zone_id.clone_from(&zone.id);
        }

        log::info!("Imported record {} from '{id}'", state.id);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::services::RecordService;
    use crate::test_utils::{FakeDnsClient, client_with_zone};

    fn service(client: &Arc<FakeDnsClient>) -> ImportService {
        ImportService::new(client.clone())
    }

    #[tokio::test]
    async fn imports_single_record() {
        let client = client_with_zone().await;
        let id = client
            .add_record("zone-1", "www", "A", "192.0.2.1", None)
            .await;
        client
            .add_record("zone-1", "api", "A", "192.0.2.2", None)
            .await;

        let state = service(&client).import("example.com/www/A").await.unwrap();

        assert_eq!(state.id, id);
        assert_eq!(state.domain, "example.com");
        assert_eq!(state.name, "www");
        assert_eq!(state.hostname, "www.example.com");
        assert_eq!(state.record_type, "A");
        assert_eq!(state.value, "192.0.2.1");
        assert_eq!(state.zone_id, "zone-1");
    }

    #[tokio::test]
    async fn accepts_fully_qualified_name() {
        let client = client_with_zone().await;
        let id = client
            .add_record("zone-1", "www", "CNAME", "target.example.net", None)
            .await;

        let state = service(&client)
            .import("example.com/www.example.com/CNAME")
            .await
            .unwrap();
        assert_eq!(state.id, id);
        assert_eq!(state.name, "www");
    }

    #[tokio::test]
    async fn apex_record_keeps_zone_name() {
        let client = client_with_zone().await;
        client
            .add_record("zone-1", "@", "TXT", "v=spf1 -all", None)
            .await;

        let state = service(&client).import("example.com/@/TXT").await.unwrap();
        assert_eq!(state.name, "example.com");
        assert_eq!(state.hostname, "example.com");
    }

    #[tokio::test]
    async fn mx_index_selects_by_list_position_not_priority() {
        let client = client_with_zone().await;
        client
            .add_record("zone-1", "mail", "MX", "mx10.example.com", Some(10))
            .await;
        let second = client
            .add_record("zone-1", "mail", "MX", "mx20.example.com", Some(20))
            .await;

        let state = service(&client)
            .import("example.com/mail/MX/1")
            .await
            .unwrap();

        assert_eq!(state.id, second);
        assert_eq!(state.priority, Some(20));
        assert_eq!(state.value, "mx20.example.com");
    }

    #[tokio::test]
    async fn mx_without_index_fails_before_remote_calls() {
        let client = client_with_zone().await;
        let err = service(&client)
            .import("example.com/mail/MX")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResourceError::Import(ImportError::MissingIndex { .. })
        ));
        assert!(client.calls().await.is_empty());
    }

    #[tokio::test]
    async fn index_past_matches_reports_index_and_count() {
        let client = client_with_zone().await;
        client
            .add_record("zone-1", "mail", "MX", "mx10.example.com", Some(10))
            .await;
        client
            .add_record("zone-1", "mail", "MX", "mx20.example.com", Some(20))
            .await;

        let err = service(&client)
            .import("example.com/mail/MX/2")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResourceError::Import(ImportError::IndexOutOfRange { index: 2, matches: 2, .. })
        ));
    }

    #[tokio::test]
    async fn unknown_domain_reports_zones_checked() {
        let client = client_with_zone().await;
        client.add_zone("zone-2", "example.org").await;
        client.add_zone("zone-3", "example.net").await;

        let err = service(&client)
            .import("missing.com/www/A")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResourceError::Import(ImportError::ZoneNotFound { zones_checked: 3, .. })
        ));
        assert!(err.to_string().contains("Checked 3 zones"));
    }

    #[tokio::test]
    async fn first_matching_zone_wins() {
        let client = Arc::new(FakeDnsClient::new());
        client.add_zone("zone-a", "other.com").await;
        client.add_zone("zone-b", "example.com").await;
        client.add_zone("zone-c", "example.com").await;
        client
            .add_record("zone-c", "www", "A", "192.0.2.3", None)
            .await;
        let id = client
            .add_record("zone-b", "www", "A", "192.0.2.2", None)
            .await;

        let state = service(&client).import("example.com/www/A").await.unwrap();
        assert_eq!(state.id, id);
        assert_eq!(state.zone_id, "zone-b");
    }

    #[tokio::test]
    async fn no_matching_record_in_zone() {
        let client = client_with_zone().await;
        client
            .add_record("zone-1", "www", "AAAA", "2001:db8::1", None)
            .await;
        client
            .add_record("zone-1", "www2", "A", "192.0.2.1", None)
            .await;

        let err = service(&client)
            .import("example.com/www/A")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResourceError::Import(ImportError::RecordNotFound { zones_checked: 1, .. })
        ));
    }

    #[tokio::test]
    async fn missing_record_reports_every_zone_listed() {
        let client = client_with_zone().await;
        client.add_zone("zone-2", "example.org").await;
        client.add_zone("zone-3", "example.net").await;

        let err = service(&client)
            .import("example.com/www/A")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResourceError::Import(ImportError::RecordNotFound { zones_checked: 3, .. })
        ));
        assert!(err.to_string().contains("Checked 3 zones"));
    }

    #[tokio::test]
    async fn names_match_regardless_of_case() {
        let client = Arc::new(FakeDnsClient::new());
        client.add_zone("zone-1", "Example.com").await;
        let id = client
            .add_record("zone-1", "www", "A", "192.0.2.1", None)
            .await;

        let state = service(&client).import("EXAMPLE.com/WWW/A").await.unwrap();
        assert_eq!(state.id, id);
        assert_eq!(state.zone_id, "zone-1");
    }

    #[tokio::test]
    async fn non_mx_duplicates_import_the_first() {
        let client = client_with_zone().await;
        let first = client
            .add_record("zone-1", "txt", "TXT", "one", None)
            .await;
        client
            .add_record("zone-1", "txt", "TXT", "two", None)
            .await;

        let state = service(&client)
            .import("example.com/txt/TXT/1")
            .await
            .unwrap();
        assert_eq!(state.id, first);
    }

    #[tokio::test]
    async fn list_errors_are_propagated() {
        let client = client_with_zone().await;
        client
            .fail_next(
                "list_records",
                ProviderError::PermissionDenied {
                    provider: "fake".to_string(),
                    raw_message: None,
                },
            )
            .await;

        let err = service(&client)
            .import("example.com/www/A")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Remote { operation: "list", source: ProviderError::PermissionDenied { .. }, .. }
        ));

        client
            .fail_next(
                "list_zones",
                ProviderError::InvalidCredentials {
                    provider: "fake".to_string(),
                    raw_message: None,
                },
            )
            .await;
        let err = service(&client)
            .import("example.com/www/A")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Import(ImportError::ListZones { .. })
        ));
    }

    #[tokio::test]
    async fn imported_state_reads_back_identically() {
        let client = client_with_zone().await;
        client
            .add_record("zone-1", "www", "A", "192.0.2.1", None)
            .await;

        let mut state = service(&client).import("example.com/www/A").await.unwrap();
        let imported = state.clone();
        RecordService::new(client.clone())
            .read(&mut state)
            .await
            .unwrap();
        assert_eq!(state, imported);
    }
}
