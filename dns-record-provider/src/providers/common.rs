//! Provider 公共工具函数

use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::types::ClientOptions;

// ============ HTTP Client ============

/// 创建带超时配置的 HTTP Client
pub fn create_http_client(options: &ClientOptions, provider: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(options.connect_timeout)
        .timeout(options.request_timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            provider: provider.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ 域名名称处理 ============

/// 去掉域名末尾的点
pub fn normalize_domain_name(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}

/// 将记录名称限定到 zone 下
/// 如: "www" + "example.com" -> "www.example.com"
/// 如: "@" + "example.com" -> "example.com"
/// 如: "www.example.com" + "example.com" -> "www.example.com"（已是完整域名）
pub fn qualify_name(name: &str, zone_name: &str) -> String {
    let zone = normalize_domain_name(zone_name);
    let name = normalize_domain_name(name);

    if name == "@" || name.is_empty() || name == zone {
        zone
    } else if name.ends_with(&format!(".{zone}")) {
        name
    } else {
        format!("{name}.{zone}")
    }
}

/// 去掉完整域名末尾的 ".<zone>" 后缀
/// 如: "www.example.com" + "example.com" -> "www"
/// 如: "example.com" + "example.com" -> "example.com"（apex 不含该后缀，原样保留）
pub fn strip_zone_suffix(full_name: &str, zone_name: &str) -> String {
    full_name
        .strip_suffix(&format!(".{zone_name}"))
        .unwrap_or(full_name)
        .to_string()
}
