//! 定义了与具体提供商无关的核心数据模型。
//!
//! 提供商在拿到各自平台的原始响应后，统一转换成这里的
//! `LoginArtifact` 和 `PollResult`。

use base64::{Engine, prelude::BASE64_STANDARD};
use serde::{Deserialize, Serialize};

/// 二维码的展示载体。
///
/// QQ 的接口直接返回 PNG 图片字节；网易云只返回一个登录链接，
/// 由外部渲染服务生成图片，所以这里是一个 URL。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayPayload {
    /// 内嵌的 PNG 图片字节。
    Image(Vec<u8>),
    /// 指向外部二维码渲染服务的图片 URL。
    Url(String),
}

impl DisplayPayload {
    /// 将载体转换成前端可直接使用的字符串。
    ///
    /// 图片字节会被编码为 `data:image/png;base64,...` 形式的
    /// Data URI，URL 则原样返回。
    #[must_use]
    pub fn as_display_string(&self) -> String {
        match self {
            Self::Image(bytes) => {
                format!("data:image/png;base64,{}", BASE64_STANDARD.encode(bytes))
            }
            Self::Url(url) => url.clone(),
        }
    }
}

/// 一次登录尝试的凭证：展示载体加上轮询用的不透明密钥。
///
/// 每次 `start()` 产生一个新的凭证；旧凭证在会话进入终态或
/// 重新 `start()` 时即作废，`session_key` 不得跨尝试复用。
#[derive(Debug, Clone)]
pub struct LoginArtifact {
    /// 二维码的展示载体。
    pub display: DisplayPayload,
    /// 后续轮询所需的不透明密钥（QQ 为 `qrsig`，网易云为 `unikey`）。
    pub session_key: String,
}

/// 轮询得到的登录状态。
///
/// 状态只会沿 `Waiting -> Scanned -> Confirmed` 推进，
/// `Expired` 可以从任何非终态到达；`Confirmed` 和 `Expired` 是终态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStatus {
    /// 等待扫码。
    Waiting,
    /// 已扫码，等待用户在手机上确认。
    Scanned,
    /// 用户已确认，登录成功。
    Confirmed,
    /// 二维码已失效，需要重新发起登录。
    Expired,
}

impl PollStatus {
    /// 返回与原始协议一致的数字状态码。
    #[must_use]
    pub fn code(self) -> i8 {
        match self {
            Self::Waiting => 0,
            Self::Scanned => 1,
            Self::Confirmed => 2,
            Self::Expired => -1,
        }
    }

    /// 是否为终态。进入终态后不应再对同一会话轮询。
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Expired)
    }
}

/// 单次轮询的结果。
///
/// 不变量：`session_cookie` 有值当且仅当 `status` 为
/// [`PollStatus::Confirmed`]。通过构造函数保证，不要手工拼装。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollResult {
    /// 本次轮询得到的状态。
    pub status: PollStatus,
    /// 面向 UI 的提示文本。
    pub message: String,
    /// 登录成功时提供商下发的原始 `Set-Cookie` 值。
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
}

impl PollResult {
    /// 构造一个非终态或过期的轮询结果（不携带 cookie）。
    #[must_use]
    pub fn pending(status: PollStatus, message: impl Into<String>) -> Self {
        debug_assert!(status != PollStatus::Confirmed);
        Self {
            status,
            message: message.into(),
            session_cookie: None,
        }
    }

    /// 构造登录成功的轮询结果，携带提供商下发的会话 cookie。
    #[must_use]
    pub fn confirmed(message: impl Into<String>, session_cookie: String) -> Self {
        Self {
            status: PollStatus::Confirmed,
            message: message.into(),
            session_cookie: Some(session_cookie),
        }
    }
}
