//! 测试辅助模块
//!
//! 提供内存版 `DnsClient` 和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use dns_record_provider::{
    DnsClient, ProviderError, Record, RecordFilter, Result, Zone, qualify_name,
};
use tokio::sync::RwLock;

use crate::types::RecordConfig;

const PROVIDER: &str = "fake";
/// Cloudflare 的 "automatic" TTL
const AUTO_TTL: u32 = 1;

// ===== FakeDnsClient =====

/// 内存中的 DNS 服务，按插入顺序返回记录，并记录每次调用
pub struct FakeDnsClient {
    zones: RwLock<Vec<Zone>>,
    records: RwLock<Vec<Record>>,
    calls: RwLock<Vec<&'static str>>,
    next_id: RwLock<usize>,
    /// 下一次调用对应方法时返回的错误
    failures: RwLock<HashMap<&'static str, ProviderError>>,
    /// 为 true 时 create 返回空 ID 且不保存记录
    empty_create_id: RwLock<bool>,
}

impl FakeDnsClient {
    pub fn new() -> Self {
        Self {
            zones: RwLock::new(Vec::new()),
            records: RwLock::new(Vec::new()),
            calls: RwLock::new(Vec::new()),
            next_id: RwLock::new(1),
            failures: RwLock::new(HashMap::new()),
            empty_create_id: RwLock::new(false),
        }
    }

    pub async fn add_zone(&self, id: &str, name: &str) {
        self.zones.write().await.push(Zone {
            id: id.to_string(),
            name: name.to_string(),
            status: "active".to_string(),
        });
    }

    /// 直接写入一条记录（不计入调用日志），返回记录 ID
    pub async fn add_record(
        &self,
        zone_id: &str,
        name: &str,
        record_type: &str,
        content: &str,
        priority: Option<u16>,
    ) -> String {
        let zone_name = self.zone_name(zone_id).await.unwrap_or_default();
        let id = self.allocate_id().await;
        self.records.write().await.push(Record {
            id: id.clone(),
            zone_id: zone_id.to_string(),
            zone_name: zone_name.clone(),
            name: qualify_name(name, &zone_name),
            record_type: record_type.to_string(),
            content: content.to_string(),
            ttl: Some(AUTO_TTL),
            priority,
            proxied: Some(false),
            proxiable: true,
            ..Record::default()
        });
        id
    }

    /// 让下一次 `method` 调用返回 `error`
    pub async fn fail_next(&self, method: &'static str, error: ProviderError) {
        self.failures.write().await.insert(method, error);
    }

    pub async fn return_empty_create_id(&self) {
        *self.empty_create_id.write().await = true;
    }

    pub async fn calls(&self) -> Vec<&'static str> {
        self.calls.read().await.clone()
    }

    /// 修改远端状态的调用次数
    pub async fn mutation_count(&self) -> usize {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| matches!(**c, "create_record" | "update_record" | "delete_record"))
            .count()
    }

    pub async fn clear_calls(&self) {
        self.calls.write().await.clear();
    }

    pub async fn record(&self, record_id: &str) -> Option<Record> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
    }

    async fn enter(&self, method: &'static str) -> Result<()> {
        self.calls.write().await.push(method);
        match self.failures.write().await.remove(method) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn allocate_id(&self) -> String {
        let mut next = self.next_id.write().await;
        let id = format!("rec-{next}");
        *next += 1;
        id
    }

    async fn zone_name(&self, zone_id: &str) -> Option<String> {
        self.zones
            .read()
            .await
            .iter()
            .find(|z| z.id == zone_id)
            .map(|z| z.name.clone())
    }

    async fn require_zone(&self, zone_id: &str) -> Result<String> {
        self.zone_name(zone_id)
            .await
            .ok_or_else(|| ProviderError::DomainNotFound {
                provider: PROVIDER.to_string(),
                domain: zone_id.to_string(),
                raw_message: None,
            })
    }

    fn not_found(record_id: &str) -> ProviderError {
        ProviderError::RecordNotFound {
            provider: PROVIDER.to_string(),
            record_id: record_id.to_string(),
            raw_message: None,
        }
    }
}

#[async_trait]
impl DnsClient for FakeDnsClient {
    fn id(&self) -> &'static str {
        PROVIDER
    }

    async fn resolve_zone_id(&self, zone_name: &str) -> Result<String> {
        self.enter("resolve_zone_id").await?;
        let zones = self.zones.read().await;
        let matching: Vec<_> = zones.iter().filter(|z| z.name == zone_name).collect();
        match matching.as_slice() {
            [] => Err(ProviderError::DomainNotFound {
                provider: PROVIDER.to_string(),
                domain: zone_name.to_string(),
                raw_message: None,
            }),
            [zone] => Ok(zone.id.clone()),
            many => Err(ProviderError::AmbiguousZone {
                provider: PROVIDER.to_string(),
                domain: zone_name.to_string(),
                count: many.len(),
            }),
        }
    }

    async fn list_zones(&self) -> Result<Vec<Zone>> {
        self.enter("list_zones").await?;
        Ok(self.zones.read().await.clone())
    }

    async fn list_records(&self, zone_id: &str, filter: &RecordFilter) -> Result<Vec<Record>> {
        self.enter("list_records").await?;
        self.require_zone(zone_id).await?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .filter(|r| r.zone_id == zone_id)
            .filter(|r| filter.record_type.as_ref().is_none_or(|t| &r.record_type == t))
            .filter(|r| filter.name.as_ref().is_none_or(|n| &r.name == n))
            .filter(|r| filter.content.as_ref().is_none_or(|c| &r.content == c))
            .cloned()
            .collect())
    }

    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<Record> {
        self.enter("get_record").await?;
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.zone_id == zone_id && r.id == record_id)
            .cloned()
            .ok_or_else(|| Self::not_found(record_id))
    }

    async fn create_record(&self, zone_id: &str, record: &Record) -> Result<Record> {
        self.enter("create_record").await?;
        let zone_name = self.require_zone(zone_id).await?;
        let mut created = Record {
            zone_id: zone_id.to_string(),
            zone_name: zone_name.clone(),
            name: qualify_name(&record.name, &zone_name),
            ttl: record.ttl.or(Some(AUTO_TTL)),
            proxied: record.proxied.or(Some(false)),
            ..record.clone()
        };
        if *self.empty_create_id.read().await {
            return Ok(created);
        }
        created.id = self.allocate_id().await;
        self.records.write().await.push(created.clone());
        Ok(created)
    }

    async fn update_record(&self, zone_id: &str, record_id: &str, record: &Record) -> Result<()> {
        self.enter("update_record").await?;
        let zone_name = self.require_zone(zone_id).await?;
        let mut records = self.records.write().await;
        let stored = records
            .iter_mut()
            .find(|r| r.zone_id == zone_id && r.id == record_id)
            .ok_or_else(|| Self::not_found(record_id))?;
        stored.name = qualify_name(&record.name, &zone_name);
        stored.record_type.clone_from(&record.record_type);
        stored.content.clone_from(&record.content);
        stored.ttl = record.ttl.or(Some(AUTO_TTL));
        stored.priority = record.priority;
        stored.proxied = record.proxied.or(Some(false));
        Ok(())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.enter("delete_record").await?;
        let mut records = self.records.write().await;
        let pos = records
            .iter()
            .position(|r| r.zone_id == zone_id && r.id == record_id)
            .ok_or_else(|| Self::not_found(record_id))?;
        records.remove(pos);
        Ok(())
    }
}

// ===== 工厂方法 =====

/// 带一个 `example.com` zone（ID 为 `zone-1`）的 fake 客户端
pub async fn client_with_zone() -> Arc<FakeDnsClient> {
    let client = Arc::new(FakeDnsClient::new());
    client.add_zone("zone-1", "example.com").await;
    client
}

pub fn record_config(name: &str, record_type: &str, value: &str) -> RecordConfig {
    RecordConfig {
        domain: "example.com".to_string(),
        name: name.to_string(),
        record_type: record_type.to_string(),
        value: value.to_string(),
        ..RecordConfig::default()
    }
}
