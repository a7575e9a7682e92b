use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{Record, RecordFilter, Zone};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（Cloudflare 为数字字符串）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
    /// HTTP 状态码
    pub status: Option<u16>,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            status: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 记录名称（用于 `RecordExists` 等错误）
    pub record_name: Option<String>,
    /// 记录 ID（用于 `RecordNotFound` 等错误）
    pub record_id: Option<String>,
    /// Zone 名称或 ID（用于 `DomainNotFound` 等错误）
    pub domain: Option<String>,
}

impl ErrorContext {
    pub fn zone(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
            ..Self::default()
        }
    }

    pub fn record(zone_id: impl Into<String>, record_id: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.into()),
            domain: Some(zone_id.into()),
            ..Self::default()
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Remote DNS service capability.
///
/// Every call is a single remote round trip (or one paginated listing) and
/// failures come back as [`ProviderError`] without retries. Implementations
/// must be shareable across tasks.
#[async_trait]
pub trait DnsClient: Send + Sync {
    /// Client identifier used in logs and error messages.
    fn id(&self) -> &'static str;

    /// Resolve a zone name to its identifier.
    ///
    /// Fails with [`ProviderError::DomainNotFound`] when no zone matches and
    /// [`ProviderError::AmbiguousZone`] when several do.
    async fn resolve_zone_id(&self, zone_name: &str) -> Result<String>;

    /// List every zone visible to the account, in service order.
    async fn list_zones(&self) -> Result<Vec<Zone>>;

    /// List the records of a zone matching `filter`, in service order.
    async fn list_records(&self, zone_id: &str, filter: &RecordFilter) -> Result<Vec<Record>>;

    /// Fetch one record. A missing record is [`ProviderError::RecordNotFound`].
    async fn get_record(&self, zone_id: &str, record_id: &str) -> Result<Record>;

    /// Create a record and return it as stored by the service.
    async fn create_record(&self, zone_id: &str, record: &Record) -> Result<Record>;

    /// Replace every field of an existing record.
    async fn update_record(&self, zone_id: &str, record_id: &str, record: &Record) -> Result<()>;

    /// Delete a record.
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}
