//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use dns_record_provider::{
    ClientOptions, DnsClient, ProviderCredentials, Record, RecordFilter,
    create_client_with_options,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试记录名称
pub fn generate_test_record_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// Token 凭证的客户端，指向 mock 服务器
pub fn mock_client(base_url: &str) -> Arc<dyn DnsClient> {
    let options = ClientOptions::default().with_api_base(base_url);
    create_client_with_options(
        ProviderCredentials::Cloudflare {
            api_token: "test-token".to_string(),
        },
        &options,
    )
    .expect("client should build")
}

/// Cloudflare 信封格式的成功响应
pub fn envelope(result: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result,
    })
}

/// Cloudflare 信封格式的失败响应
pub fn error_envelope(code: i32, message: &str) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "errors": [{"code": code, "message": message}],
        "messages": [],
        "result": null,
    })
}

/// 测试上下文 - 封装客户端和测试域名
pub struct TestContext {
    pub client: Arc<dyn DnsClient>,
    pub domain: String,
    pub zone_id: Option<String>,
}

impl TestContext {
    /// 从环境变量创建真实 API 测试上下文
    pub fn from_env() -> Option<Self> {
        let credentials = ProviderCredentials::from_env().ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;
        let client = create_client_with_options(credentials, &ClientOptions::from_env()).ok()?;

        Some(Self {
            client,
            domain,
            zone_id: None,
        })
    }

    /// 查找测试域名的 `zone_id`
    pub async fn find_zone_id(&mut self) -> Option<String> {
        if let Some(id) = &self.zone_id {
            return Some(id.clone());
        }
        let id = self.client.resolve_zone_id(&self.domain).await.ok()?;
        self.zone_id = Some(id.clone());
        Some(id)
    }

    /// 清理所有残留的 `_test-` 记录
    pub async fn cleanup_all_test_records(&self, zone_id: &str) {
        let Ok(records) = self
            .client
            .list_records(zone_id, &RecordFilter::default())
            .await
        else {
            return;
        };
        for record in records.iter().filter(|r| r.name.starts_with("_test-")) {
            let _ = self.client.delete_record(zone_id, &record.id).await;
            println!("cleaned up {} ({})", record.name, record.id);
        }
    }

    /// 构造测试用 TXT 记录
    pub fn txt_record(&self, name: &str, content: &str) -> Record {
        Record {
            name: format!("{name}.{}", self.domain),
            record_type: "TXT".to_string(),
            content: content.to_string(),
            ttl: Some(120),
            ..Record::default()
        }
    }
}
