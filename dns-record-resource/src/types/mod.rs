//! 类型定义模块

mod import_id;
mod record;

pub use import_id::ImportId;
pub use record::{RecordConfig, ResourceData};

// Re-export provider 库的公共类型
pub use dns_record_provider::{ProviderCredentials, Record, RecordType, Zone};
