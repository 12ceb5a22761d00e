//! 提供商模块
//!
//! 该模块定义了扫码登录提供商的核心抽象。两个平台的远端
//! 协议结构完全不同（QQ 靠 HTML 片段匹配，网易云靠 JSON
//! 状态码），在这里被归一成同一个轮询合同。

use std::str::FromStr;

use async_trait::async_trait;

use crate::{
    error::{QrLoginError, Result},
    model::{LoginArtifact, PollResult},
};

pub mod netease;
pub mod qq;

/// 所有扫码登录提供商需要实现的通用接口。
///
/// 提供商集合是封闭且很小的（QQ 和网易云），状态映射逻辑
/// 与各自的提供商放在一起。
#[async_trait]
pub trait QrLoginProvider: Send + Sync {
    ///
    /// 返回提供商的唯一名称。
    ///
    /// 一个全小写的静态字符串，例如 `"qq"`, `"netease"`。
    ///
    fn name(&self) -> &'static str;

    ///
    /// 向平台申请一次新的扫码登录，返回登录凭证。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含本次尝试的 [`LoginArtifact`]：
    /// 二维码展示载体加上后续轮询用的 `session_key`。
    ///
    async fn create_artifact(&self) -> Result<LoginArtifact>;

    ///
    /// 用凭证中的 `session_key` 查询一次扫码状态。
    ///
    /// # 参数
    /// * `session_key` - `create_artifact` 返回的不透明密钥。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含归一化后的 [`PollResult`]。
    /// 无法识别的响应一律映射为过期，而不是报错。
    ///
    async fn check_status(&self, session_key: &str) -> Result<PollResult>;
}

/// 支持的登录平台。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// QQ 音乐（通过 QQ 扫码）。
    Qq,
    /// 网易云音乐。
    Netease,
}

impl ProviderKind {
    /// 返回平台的全小写名称。
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Qq => "qq",
            Self::Netease => "netease",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = QrLoginError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "qq" => Ok(Self::Qq),
            "netease" => Ok(Self::Netease),
            other => Err(QrLoginError::ProviderNotSupported(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_round_trip() {
        assert_eq!("qq".parse::<ProviderKind>().unwrap(), ProviderKind::Qq);
        assert_eq!(
            "netease".parse::<ProviderKind>().unwrap(),
            ProviderKind::Netease
        );
        assert_eq!(ProviderKind::Qq.as_str(), "qq");
    }

    #[test]
    fn test_unknown_provider_kind() {
        let err = "kugou".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, QrLoginError::ProviderNotSupported(name) if name == "kugou"));
    }
}
