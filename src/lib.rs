#![warn(missing_docs)]

//! # QR Login RS
//!
//! 一个复刻 QQ 音乐与网易云音乐"手机扫码登录"流程的 Rust 库。
//!
//! 两个平台都没有公开文档：QQ 的状态藏在 HTML 片段里，网易云
//! 用 JSON 状态码；这个库把二者归一成同一个轮询合同，登录
//! 成功时从响应头里刮出会话 cookie 交给调用方原样采用。
//!
//! ## 扫码登录
//!
//! ```rust,no_run
//! use qr_login_rs::{PollStatus, ProviderKind, QrLoginClient};
//!
//! async {
//!     let client = QrLoginClient::new().unwrap();
//!     let mut session = client.create_session(ProviderKind::Qq).unwrap();
//!
//!     // 拿到二维码，展示给用户
//!     let artifact = session.start().await.unwrap();
//!     println!("二维码: {}", artifact.display.as_display_string());
//!
//!     // 以 2~3 秒的间隔轮询，直到终态
//!     loop {
//!         let result = session.poll().await.unwrap();
//!         println!("{}", result.message);
//!         match result.status {
//!             PollStatus::Confirmed => {
//!                 println!("会话 cookie: {}", result.session_cookie.unwrap());
//!                 break;
//!             }
//!             PollStatus::Expired => break,
//!             _ => tokio::time::sleep(std::time::Duration::from_secs(2)).await,
//!         }
//!     }
//! };
//! ```

pub mod config;
pub mod cookie;
pub mod error;
pub mod model;
pub mod providers;
pub mod session;
pub mod store;
pub mod transport;

pub use crate::{
    config::ClientConfig,
    error::{QrLoginError, Result},
    model::{DisplayPayload, LoginArtifact, PollResult, PollStatus},
    providers::{ProviderKind, QrLoginProvider},
    session::QrLoginSession,
};

use crate::{
    providers::{netease::NeteaseLogin, qq::QqLogin},
    transport::ProviderTransport,
};

/// 顶层扫码登录客户端，持有配置和共享的传输层。
///
/// 这是与本库交互的主要入口点。一个客户端可以开启任意多个
/// 互相独立的登录会话。
pub struct QrLoginClient {
    config: ClientConfig,
    transport: ProviderTransport,
}

impl QrLoginClient {
    /// 用默认配置创建客户端。
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// 用自定义配置创建客户端。
    ///
    /// # 参数
    /// * `config` - 超时、User-Agent 和各接口地址。
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ProviderTransport::new(config.timeout)?;
        Ok(Self { config, transport })
    }

    /// 为指定平台开启一个新的登录会话。
    ///
    /// 返回的会话处于 `Idle` 状态，调用
    /// [`QrLoginSession::start`] 后才会真正请求二维码。
    pub fn create_session(&self, kind: ProviderKind) -> Result<QrLoginSession> {
        let provider: Box<dyn QrLoginProvider> = match kind {
            ProviderKind::Qq => Box::new(QqLogin::new(self.transport.clone(), &self.config)?),
            ProviderKind::Netease => {
                Box::new(NeteaseLogin::new(self.transport.clone(), &self.config)?)
            }
        };
        Ok(QrLoginSession::new(provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sessions_for_both_kinds() {
        let client = QrLoginClient::new().unwrap();
        let qq = client.create_session(ProviderKind::Qq).unwrap();
        let netease = client.create_session(ProviderKind::Netease).unwrap();
        assert_eq!(qq.provider_name(), "qq");
        assert_eq!(netease.provider_name(), "netease");
        assert_eq!(qq.status(), None);
    }
}
