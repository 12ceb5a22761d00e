//! QQ 扫码登录的提供商实现。
//!
//! 走的是 ptlogin2 的网页扫码通道：先取一张二维码 PNG，
//! 会话签名 `qrsig` 藏在响应的 `Set-Cookie` 里；轮询时用
//! `qrsig` 推导出 `ptqrtoken`，根据响应正文中的中文片段
//! 判断扫码进度。

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{info, trace, warn};

use crate::{
    config::ClientConfig,
    cookie,
    error::{QrLoginError, Result},
    model::{DisplayPayload, LoginArtifact, PollResult, PollStatus},
    providers::QrLoginProvider,
    transport::ProviderTransport,
};

pub mod token;

/// 取码接口的固定查询参数。`appid` 等都是提供商强制的魔法
/// 常量，改动任何一个都会让后续轮询被拒绝。
const QR_SHOW_QUERY: &str = "appid=716027609&e=2&l=M&s=3&d=72&v=4&t=0.8";

/// 轮询接口中除 `ptqrtoken` 外的固定参数。`u1` 是登录成功后
/// 的跳转目标（QQ 音乐主页），必须原样保留。
const QR_POLL_QUERY: &str =
    "u1=https%3A%2F%2Fy.qq.com%2F&ptredirect=0&h=1&t=1&g=1&from_ui=1&ptlang=2052";

/// 轮询响应正文中的已知协议片段，匹配不到任何一个就按过期处理。
const MARKER_CONFIRMED: &str = "登录成功";
const MARKER_WAITING: &str = "二维码未失效";
const MARKER_SCANNED: &str = "二维码认证中";

/// QQ 扫码登录的提供商实现。
pub struct QqLogin {
    transport: ProviderTransport,
    qr_show_url: String,
    qr_poll_url: String,
    user_agent: HeaderValue,
}

impl QqLogin {
    /// 创建一个新的 `QqLogin` 提供商实例。
    ///
    /// # 参数
    /// * `transport` - 共享的传输层。
    /// * `config` - 客户端配置，接口地址和 User-Agent 取自这里。
    pub fn new(transport: ProviderTransport, config: &ClientConfig) -> Result<Self> {
        let user_agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| QrLoginError::InvalidConfig(format!("User-Agent 无法作为请求头: {e}")))?;
        Ok(Self {
            transport,
            qr_show_url: config.qq.qr_show.clone(),
            qr_poll_url: config.qq.qr_poll.clone(),
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
impl QrLoginProvider for QqLogin {
    fn name(&self) -> &'static str {
        "qq"
    }

    /// 请求一张新的登录二维码。
    ///
    /// 二维码以 PNG 字节返回，会话签名 `qrsig` 从 `Set-Cookie`
    /// 头中截取。没有下发 `qrsig` 时本次尝试作废。
    async fn create_artifact(&self) -> Result<LoginArtifact> {
        let url = format!("{}?{}", self.qr_show_url, QR_SHOW_QUERY);
        let response = self.transport.get(&url, self.base_headers()).await?;

        let set_cookie = response
            .set_cookie()
            .ok_or_else(|| QrLoginError::Artifact("提供商未下发 Set-Cookie".to_string()))?;
        let qrsig = cookie::extract(&set_cookie, "qrsig")
            .ok_or_else(|| QrLoginError::Artifact("提供商未下发 qrsig 会话签名".to_string()))?;

        info!(provider = self.name(), "已获取登录二维码");

        Ok(LoginArtifact {
            display: DisplayPayload::Image(response.body_bytes().to_vec()),
            session_key: qrsig,
        })
    }

    /// 查询一次扫码状态。
    ///
    /// 响应是 HTML/纯文本，按优先级匹配其中的协议片段；
    /// 匹配不到任何片段时按过期处理。
    async fn check_status(&self, session_key: &str) -> Result<PollResult> {
        let ptqrtoken = token::derive_token(session_key);
        let url = format!(
            "{}?ptqrtoken={}&{}",
            self.qr_poll_url, ptqrtoken, QR_POLL_QUERY
        );

        let mut headers = self.base_headers();
        let cookie_value = HeaderValue::from_str(&format!("qrsig={session_key}"))
            .map_err(|e| QrLoginError::Artifact(format!("会话密钥含非法字符: {e}")))?;
        headers.insert(COOKIE, cookie_value);

        let response = self.transport.get(&url, headers).await?;
        let body = response.text();
        trace!("QQ 轮询原始响应: {body}");

        let result = map_poll_body(&body, response.set_cookie());
        if result.status == PollStatus::Confirmed {
            info!(provider = self.name(), "扫码登录成功");
        }
        Ok(result)
    }
}

/// 把轮询响应正文映射成归一化状态。
///
/// 一个响应理论上可能同时包含多个协议片段，这里按
/// 成功 > 未失效 > 认证中 的优先级取第一个命中项，
/// 其余情况（包括空响应）一律按过期处理。
fn map_poll_body(body: &str, set_cookie: Option<String>) -> PollResult {
    if body.contains(MARKER_CONFIRMED) {
        // 成功响应的 Set-Cookie 就是调用方要采用的会话凭据
        return PollResult::confirmed("登录成功", set_cookie.unwrap_or_default());
    }
    if body.contains(MARKER_WAITING) {
        return PollResult::pending(PollStatus::Waiting, "等待扫码");
    }
    if body.contains(MARKER_SCANNED) {
        return PollResult::pending(PollStatus::Scanned, "已扫码，请确认");
    }
    warn!("未识别的轮询响应，按二维码过期处理");
    PollResult::pending(PollStatus::Expired, "二维码已过期")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_confirmed_captures_cookie() {
        let body = "ptuiCB('0','0','https://y.qq.com/','1','登录成功！', 'nick')";
        let cookie = Some("uin=o123456; skey=@abc123".to_string());
        let result = map_poll_body(body, cookie);
        assert_eq!(result.status, PollStatus::Confirmed);
        assert_eq!(
            result.session_cookie.as_deref(),
            Some("uin=o123456; skey=@abc123")
        );
    }

    #[test]
    fn test_map_waiting() {
        let result = map_poll_body("ptuiCB('66','0','','0','二维码未失效。', '')", None);
        assert_eq!(result.status, PollStatus::Waiting);
        assert!(result.session_cookie.is_none());
    }

    #[test]
    fn test_map_scanned() {
        let result = map_poll_body("ptuiCB('67','0','','0','二维码认证中。', '')", None);
        assert_eq!(result.status, PollStatus::Scanned);
    }

    #[test]
    fn test_map_unrecognized_defaults_to_expired() {
        assert_eq!(
            map_poll_body("ptuiCB('65','0','','0','二维码已失效。', '')", None).status,
            PollStatus::Expired
        );
        assert_eq!(map_poll_body("", None).status, PollStatus::Expired);
        assert_eq!(map_poll_body("<html>垃圾响应</html>", None).status, PollStatus::Expired);
    }

    #[test]
    fn test_map_priority_prefers_confirmed() {
        // 同时出现多个片段时，成功片段优先
        let body = "二维码未失效 登录成功";
        let result = map_poll_body(body, Some("skey=1".to_string()));
        assert_eq!(result.status, PollStatus::Confirmed);
    }
}
