//! 业务逻辑服务层

mod import_service;
mod record_service;

pub use import_service::ImportService;
pub use record_service::RecordService;

use dns_record_provider::{DnsClient, ProviderError};

use crate::error::{ResourceError, ResourceResult};

/// 将 zone 名称解析为 zone ID（每次操作都重新解析，不缓存）
pub(crate) async fn resolve_zone(client: &dyn DnsClient, domain: &str) -> ResourceResult<String> {
    client
        .resolve_zone_id(domain)
        .await
        .map_err(|source| ResourceError::ZoneResolution {
            domain: domain.to_string(),
            source,
        })
}

/// 按记录 ID 的远端调用错误：记录不存在单独区分
pub(crate) fn record_call_error(
    operation: &'static str,
    zone_id: &str,
    record_id: &str,
    source: ProviderError,
) -> ResourceError {
    if source.is_record_not_found() {
        ResourceError::RecordNotFound {
            record_id: record_id.to_string(),
            zone_id: zone_id.to_string(),
        }
    } else {
        ResourceError::Remote {
            operation,
            context: format!("zone {zone_id}, id {record_id}"),
            source,
        }
    }
}

/// 预期内的错误记 warn，其余记 error
pub(crate) fn log_failure(operation: &str, err: &ResourceError) {
    if err.is_expected() {
        log::warn!("Record {operation} failed: {err}");
    } else {
        log::error!("Record {operation} failed: {err}");
    }
}
