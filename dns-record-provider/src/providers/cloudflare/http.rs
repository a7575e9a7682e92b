//! Cloudflare HTTP 请求方法

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::types::ProviderCredentials;
use crate::utils::log_sanitizer::truncate_for_log;

use super::{CloudflareClient, CloudflareResponse, RecordBody};

impl CloudflareClient {
    /// 按凭证类型附加认证头
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            ProviderCredentials::Cloudflare { api_token } => builder.bearer_auth(api_token),
            ProviderCredentials::CloudflareGlobalKey { email, api_key } => builder
                .header("X-Auth-Email", email)
                .header("X-Auth-Key", api_key),
        }
    }

    /// 发送请求并解析 Cloudflare 响应信封
    ///
    /// `success == false` 或无法解析的错误响应都会经过 `map_error` 转换
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&RecordBody<'_>>,
        ctx: &ErrorContext,
    ) -> Result<CloudflareResponse<T>> {
        let url = format!("{}{path}", self.api_base);
        let mut builder = self.authorize(self.client.request(method.clone(), &url));
        if let Some(body) = body {
            if let Ok(json) = serde_json::to_string(body) {
                log::debug!("[{}] Request Body: {json}", self.provider_name());
            }
            builder = builder.json(body);
        }

        let (status, text) =
            HttpUtils::execute_request(builder, self.provider_name(), method.as_str(), &url)
                .await?;

        let response: CloudflareResponse<T> =
            match serde_json::from_str::<CloudflareResponse<T>>(&text) {
                Ok(response) => response,
                // 非 JSON 的错误页（如网关返回的 HTML）
                Err(_) if status >= 400 => {
                    return Err(self.map_error(
                        RawApiError::new(truncate_for_log(&text)).with_status(status),
                        ctx.clone(),
                    ));
                }
                Err(_) => HttpUtils::parse_json(&text, self.provider_name())?,
            };

        if !response.success {
            let (code, message) = response.first_error();
            log::error!("[{}] API error {code}: {message}", self.provider_name());
            let raw = if code.is_empty() {
                RawApiError::new(message)
            } else {
                RawApiError::with_code(code, message)
            };
            return Err(self.map_error(raw.with_status(status), ctx.clone()));
        }

        Ok(response)
    }

    /// 取出 `result` 字段，缺失时视为解析错误
    fn into_result<T>(&self, response: CloudflareResponse<T>) -> Result<T> {
        response
            .result
            .ok_or_else(|| self.parse_error("missing 'result' in response"))
    }

    /// 执行 GET 请求
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        ctx: &ErrorContext,
    ) -> Result<T> {
        let response = self.send(Method::GET, path, None, ctx).await?;
        self.into_result(response)
    }

    /// 执行 GET 请求并依次读取所有分页
    ///
    /// `path` 可以已带查询参数，分页参数会追加在后面
    pub(crate) async fn get_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        per_page: u32,
        ctx: &ErrorContext,
    ) -> Result<Vec<T>> {
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut items = Vec::new();
        let mut page = 1u32;

        loop {
            let paged = format!("{path}{separator}page={page}&per_page={per_page}");
            let response: CloudflareResponse<Vec<T>> =
                self.send(Method::GET, &paged, None, ctx).await?;
            let more = response.has_more_pages();
            items.extend(response.result.unwrap_or_default());
            if !more {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    /// 执行 POST 请求
    ///
    /// 成功但 `result` 为空时返回 `None`，由调用方决定如何处理
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &RecordBody<'_>,
        ctx: &ErrorContext,
    ) -> Result<Option<T>> {
        let response = self.send(Method::POST, path, Some(body), ctx).await?;
        Ok(response.result)
    }

    /// 执行 PUT 请求（整体替换）
    pub(crate) async fn put(
        &self,
        path: &str,
        body: &RecordBody<'_>,
        ctx: &ErrorContext,
    ) -> Result<()> {
        self.send::<serde_json::Value>(Method::PUT, path, Some(body), ctx)
            .await
            .map(|_| ())
    }

    /// 执行 DELETE 请求
    pub(crate) async fn delete(&self, path: &str, ctx: &ErrorContext) -> Result<()> {
        self.send::<serde_json::Value>(Method::DELETE, path, None, ctx)
            .await
            .map(|_| ())
    }
}
