//! 网易云音乐扫码登录的提供商实现。
//!
//! 官方的 unikey 接口（weapi）要求私有的请求加密，这个库不
//! 复刻那套加密，改走返回兼容 `unikey` 的镜像服务；这是继承
//! 自原设计的已知保真缺口。轮询接口本身无需加密，直接请求
//! 官方地址并按 JSON 状态码归一化。

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{info, trace, warn};

use crate::{
    config::ClientConfig,
    error::{QrLoginError, Result},
    model::{DisplayPayload, LoginArtifact, PollResult, PollStatus},
    providers::QrLoginProvider,
    transport::ProviderTransport,
};

pub mod models;

/// 轮询接口的协议状态码。
const CODE_WAITING: i64 = 801;
const CODE_SCANNED: i64 = 802;
const CODE_CONFIRMED: i64 = 803;

/// 网易云扫码登录的提供商实现。
pub struct NeteaseLogin {
    transport: ProviderTransport,
    unikey_url: String,
    qr_poll_url: String,
    qr_render_url: String,
    login_target_url: String,
    user_agent: HeaderValue,
}

impl NeteaseLogin {
    /// 创建一个新的 `NeteaseLogin` 提供商实例。
    ///
    /// # 参数
    /// * `transport` - 共享的传输层。
    /// * `config` - 客户端配置，接口地址和 User-Agent 取自这里。
    pub fn new(transport: ProviderTransport, config: &ClientConfig) -> Result<Self> {
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| QrLoginError::InvalidConfig(format!("User-Agent 无法作为请求头: {e}")))?;
        Ok(Self {
            transport,
            unikey_url: config.netease.unikey.clone(),
            qr_poll_url: config.netease.qr_poll.clone(),
            qr_render_url: config.netease.qr_render.clone(),
            login_target_url: config.netease.login_target.clone(),
            user_agent,
        })
    }

    fn base_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, self.user_agent.clone());
        headers
    }
}

#[async_trait]
impl QrLoginProvider for NeteaseLogin {
    fn name(&self) -> &'static str {
        "netease"
    }

    /// 申请一次性的 `unikey` 并拼出二维码图片地址。
    ///
    /// 这个提供商不自己渲染 PNG：二维码内容是嵌入 `unikey`
    /// 的登录目标页，交给外部渲染服务生成图片。
    async fn create_artifact(&self) -> Result<LoginArtifact> {
        let url = format!(
            "{}?timestamp={}",
            self.unikey_url,
            Utc::now().timestamp_millis()
        );
        let response = self.transport.get(&url, self.base_headers()).await?;

        let parsed: models::UnikeyResponse = response
            .json()
            .map_err(|e| QrLoginError::Artifact(format!("unikey 响应解析失败: {e}")))?;
        let unikey = parsed
            .data
            .and_then(|d| d.unikey)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| QrLoginError::Artifact("提供商未返回 unikey".to_string()))?;

        let qr_target = format!("{}?codekey={unikey}", self.login_target_url);
        let image_url = format!(
            "{}?size=200x200&data={}",
            self.qr_render_url,
            urlencoding::encode(&qr_target)
        );

        info!(provider = self.name(), "已获取登录 unikey");

        Ok(LoginArtifact {
            display: DisplayPayload::Url(image_url),
            session_key: unikey,
        })
    }

    /// 查询一次扫码状态。
    ///
    /// 时间戳参数只为击穿缓存，没有语义；响应按 JSON 的
    /// `code` 字段归一化，解析不出 `code` 时按过期处理。
    async fn check_status(&self, session_key: &str) -> Result<PollResult> {
        let url = format!(
            "{}?type=1&key={}&timestamp={}",
            self.qr_poll_url,
            urlencoding::encode(session_key),
            Utc::now().timestamp_millis()
        );

        let mut headers = self.base_headers();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let response = self.transport.get(&url, headers).await?;
        trace!("网易云轮询原始响应: {}", response.text());

        let code = response
            .json::<models::QrPollResponse>()
            .ok()
            .and_then(|r| r.code);
        let result = map_poll_code(code, response.set_cookie());
        if result.status == PollStatus::Confirmed {
            info!(provider = self.name(), "扫码登录成功");
        }
        Ok(result)
    }
}

/// 把轮询接口的状态码映射成归一化状态。
///
/// 803 成功、801 等待、802 已扫码；其余值（以及解析失败的
/// `None`）一律按过期处理，避免 UI 在死码上无限等待。
fn map_poll_code(code: Option<i64>, set_cookie: Option<String>) -> PollResult {
    match code {
        Some(CODE_CONFIRMED) => PollResult::confirmed("登录成功", set_cookie.unwrap_or_default()),
        Some(CODE_WAITING) => PollResult::pending(PollStatus::Waiting, "等待扫码"),
        Some(CODE_SCANNED) => PollResult::pending(PollStatus::Scanned, "已扫码，等待确认"),
        other => {
            warn!(code = ?other, "未识别的轮询状态码，按二维码过期处理");
            PollResult::pending(PollStatus::Expired, "二维码已过期或错误")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_confirmed_captures_cookie() {
        let cookie = Some("MUSIC_U=abcdef; __csrf=123".to_string());
        let result = map_poll_code(Some(803), cookie);
        assert_eq!(result.status, PollStatus::Confirmed);
        assert_eq!(
            result.session_cookie.as_deref(),
            Some("MUSIC_U=abcdef; __csrf=123")
        );
    }

    #[test]
    fn test_map_waiting_and_scanned() {
        assert_eq!(map_poll_code(Some(801), None).status, PollStatus::Waiting);
        assert_eq!(map_poll_code(Some(802), None).status, PollStatus::Scanned);
    }

    #[test]
    fn test_map_unknown_code_defaults_to_expired() {
        assert_eq!(map_poll_code(Some(999), None).status, PollStatus::Expired);
        assert_eq!(map_poll_code(Some(800), None).status, PollStatus::Expired);
        assert_eq!(map_poll_code(None, None).status, PollStatus::Expired);
    }

    #[test]
    fn test_poll_response_parsing() {
        let body = r#"{"code":802,"message":"授权中","nickname":"某用户"}"#;
        let parsed: models::QrPollResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.code, Some(802));
        assert_eq!(parsed.nickname.as_deref(), Some("某用户"));
        assert_eq!(parsed.message.as_deref(), Some("授权中"));
    }

    #[test]
    fn test_unikey_response_parsing() {
        let body = r#"{"code":200,"data":{"code":200,"unikey":"abc-123"}}"#;
        let parsed: models::UnikeyResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.code, Some(200));
        assert_eq!(parsed.data.unwrap().unikey.as_deref(), Some("abc-123"));
    }
}
