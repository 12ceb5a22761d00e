//! 面向提供商的出站 HTTP 封装。
//!
//! 这是整个库中唯一接触网络的组件。响应以原始字节保存，
//! 并完整保留所有响应头，cookie 的提取依赖读取 `Set-Cookie`。

use std::time::Duration;

use reqwest::{
    Client, RequestBuilder, StatusCode,
    header::{HeaderMap, SET_COOKIE},
};
use tracing::{debug, trace};

use crate::error::{QrLoginError, Result};

/// 出站 HTTP 客户端封装。
///
/// 可以被多个登录会话共享；内部的 `reqwest::Client` 本身是
/// 可克隆且可重入的。
#[derive(Debug, Clone)]
pub struct ProviderTransport {
    http_client: Client,
}

impl ProviderTransport {
    /// 创建一个新的传输层实例。
    ///
    /// # 参数
    /// * `timeout` - 单次请求的超时时间。提供商的接口可能挂起，
    ///   必须有界。
    pub fn new(timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(QrLoginError::ClientBuild)?;
        Ok(Self { http_client })
    }

    /// 发送 GET 请求。
    ///
    /// # 参数
    /// * `url` - 目标 URL（含查询参数）。
    /// * `headers` - 附加的请求头。
    pub async fn get(&self, url: &str, headers: HeaderMap) -> Result<TransportResponse> {
        debug!(url, "发送 GET 请求");
        self.execute(self.http_client.get(url).headers(headers), url)
            .await
    }

    /// 发送 POST 请求（不带请求体）。
    pub async fn post(&self, url: &str, headers: HeaderMap) -> Result<TransportResponse> {
        debug!(url, "发送 POST 请求");
        self.execute(self.http_client.post(url).headers(headers), url)
            .await
    }

    async fn execute(&self, request: RequestBuilder, url: &str) -> Result<TransportResponse> {
        let response = request.send().await.map_err(|e| QrLoginError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(QrLoginError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| QrLoginError::Transport {
                url: url.to_string(),
                source: e,
            })?
            .to_vec();

        trace!(url, status = %status, body_len = body.len(), "收到响应");

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

/// 一次请求的完整响应：状态码、全部响应头和原始字节。
#[derive(Debug, Clone)]
pub struct TransportResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TransportResponse {
    /// 响应的 HTTP 状态码。
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// 响应体的原始字节。
    #[must_use]
    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    /// 把响应体按 UTF-8 解读为文本（无效字节做有损替换）。
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// 把响应体解析成结构化 JSON。
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// 全部响应头（大小写不敏感）。
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// 把所有 `Set-Cookie` 头的值拼接成一个字符串。
    ///
    /// 提供商可能在一个响应里下发多条 `Set-Cookie`；调用方
    /// 把拼接后的整串作为会话凭据原样保存。没有任何
    /// `Set-Cookie` 时返回 `None`。
    #[must_use]
    pub fn set_cookie(&self) -> Option<String> {
        let joined = self
            .headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect::<Vec<_>>()
            .join("; ");
        if joined.is_empty() { None } else { Some(joined) }
    }
}
