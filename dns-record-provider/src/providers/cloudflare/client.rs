//! `DnsClient` implementation for Cloudflare

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::normalize_domain_name;
use crate::traits::{DnsClient, ErrorContext, ProviderErrorMapper};
use crate::types::{Record, RecordFilter, Zone};

use super::{
    CloudflareClient, CloudflareDnsRecord, CloudflareZone, MAX_PAGE_SIZE_RECORDS,
    MAX_PAGE_SIZE_ZONES, RecordBody,
};

impl CloudflareClient {
    /// Query string for a record listing filter; empty when nothing is set.
    fn filter_query(filter: &RecordFilter) -> String {
        let params: Vec<String> = [
            ("type", filter.record_type.as_deref()),
            ("name", filter.name.as_deref()),
            ("content", filter.content.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}={}", urlencoding::encode(v))))
        .collect();

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }
}

#[async_trait]
impl DnsClient for CloudflareClient {
    fn id(&self) -> &'static str {
        self.provider_name()
    }

    async fn resolve_zone_id(&self, zone_name: &str) -> Result<String> {
        let name = normalize_domain_name(zone_name);
        let path = format!("/zones?name={}", urlencoding::encode(&name));
        let mut zones: Vec<CloudflareZone> = self
            .get_all_pages(&path, MAX_PAGE_SIZE_ZONES, &ErrorContext::zone(&name))
            .await?;

        match zones.len() {
            0 => Err(ProviderError::DomainNotFound {
                provider: self.provider_name().to_string(),
                domain: name,
                raw_message: None,
            }),
            1 => {
                let zone = zones.remove(0);
                log::debug!("[cloudflare] zone {name} resolved to {}", zone.id);
                Ok(zone.id)
            }
            count => Err(ProviderError::AmbiguousZone {
                provider: self.provider_name().to_string(),
                domain: name,
                count,
            }),
        }
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let zones: Vec<CloudflareZone> = self
            .get_all_pages("/zones", MAX_PAGE_SIZE_ZONES, &ErrorContext::default())
            .await?;
        Ok(zones.into_iter().map(Zone::from).collect())
    }

    async fn list_records(&self, zone_id: &str, filter: &RecordFilter) -> Result<Vec<Record>> {
        let path = format!(
            "/zones/{zone_id}/dns_records{}",
            Self::filter_query(filter)
        );
        let records: Vec<CloudflareDnsRecord> = self
            .get_all_pages(&path, MAX_PAGE_SIZE_RECORDS, &ErrorContext::zone(zone_id))
            .await?;
        Ok(records
            .into_iter()
            .map(|r| r.into_record(zone_id))
            .collect())
    }

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<Record> {
        let record: CloudflareDnsRecord = self
            .get(
                &format!("/zones/{zone_id}/dns_records/{record_id}"),
                &ErrorContext::record(zone_id, record_id),
            )
            .await?;
        Ok(record.into_record(zone_id))
    }

    async fn create_record(&self, zone_id: &str, record: &Record) -> Result<Record> {
        let ctx = ErrorContext {
            record_name: Some(record.name.clone()),
            domain: Some(zone_id.to_string()),
            ..ErrorContext::default()
        };
        let created: Option<CloudflareDnsRecord> = self
            .post(
                &format!("/zones/{zone_id}/dns_records"),
                &RecordBody::from(record),
                &ctx,
            )
            .await?;
        // 接受了请求却没有返回记录：交给调用方按空 ID 处理
        let Some(created) = created else {
            log::warn!("[cloudflare] create of '{}' returned no record", record.name);
            return Ok(Record {
                id: String::new(),
                zone_id: zone_id.to_string(),
                ..record.clone()
            });
        };
        log::info!(
            "[cloudflare] created {} record {} ({})",
            created.record_type,
            created.name,
            created.id
        );
        Ok(created.into_record(zone_id))
    }

    async fn update_record(&self, zone_id: &str, record_id: &str, record: &Record) -> Result<()> {
        let mut ctx = ErrorContext::record(zone_id, record_id);
        ctx.record_name = Some(record.name.clone());
        self.put(
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            &RecordBody::from(record),
            &ctx,
        )
        .await?;
        log::info!("[cloudflare] updated record {record_id}");
        Ok(())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.delete(
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
            &ErrorContext::record(zone_id, record_id),
        )
        .await?;
        log::info!("[cloudflare] deleted record {record_id}");
        Ok(())
    }
}
