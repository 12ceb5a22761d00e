//! 定义了整个 `qr_login_rs` 库的错误类型 `QrLoginError`。

use thiserror::Error;

/// `qr_login_rs` 库的通用错误枚举。
#[derive(Error, Debug)]
pub enum QrLoginError {
    /// 网络请求失败（连接失败、超时等，源自 `reqwest::Error`）。
    ///
    /// 属于瞬态错误，调用方可以选择用同一个会话重试。
    #[error("请求 `{url}` 失败: {source}")]
    Transport {
        /// 请求的目标 URL。
        url: String,
        /// 底层的 `reqwest` 错误。
        #[source]
        source: reqwest::Error,
    },

    /// 远端返回了非 2xx 的 HTTP 状态码。
    #[error("请求 `{url}` 返回了异常状态码 {status}")]
    HttpStatus {
        /// 请求的目标 URL。
        url: String,
        /// 响应的 HTTP 状态码。
        status: u16,
    },

    /// 配置不合法（例如 User-Agent 无法作为请求头发送）。
    #[error("配置不合法: {0}")]
    InvalidConfig(String),

    /// 初始化 HTTP 客户端失败。
    #[error("初始化 HTTP 客户端失败: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// 提供商的响应无法构建出可用的登录凭证，本次登录尝试作废。
    #[error("无法构建登录凭证: {0}")]
    Artifact(String),

    /// 会话状态不允许当前操作（未 start 就 poll，或在终态后继续 poll）。
    ///
    /// 这是调用方的使用错误，不应重试。
    #[error("无效的会话状态: {0}")]
    InvalidState(String),

    /// 不支持的登录提供商
    #[error("不支持的提供商: '{0}'")]
    ProviderNotSupported(String),

    /// 用户名已被占用
    #[error("用户名已存在: '{0}'")]
    UsernameTaken(String),

    /// 指定的存储记录不存在
    #[error("记录不存在: {0}")]
    StoreNotFound(String),

    /// 调用者不是歌单的所有者，拒绝修改
    #[error("用户 {user_id} 无权操作歌单 {playlist_id}")]
    NotPlaylistOwner {
        /// 被操作的歌单 ID。
        playlist_id: String,
        /// 发起操作的用户 ID。
        user_id: String,
    },
}

impl QrLoginError {
    /// 判断错误是否属于瞬态的网络类错误。
    ///
    /// 瞬态错误不会改变登录会话的状态，调用方可以对同一次
    /// 轮询进行重试；其它错误都意味着本次尝试应当终止。
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::HttpStatus { .. })
    }
}

/// `QrLoginError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, QrLoginError>;
