//! 单次扫码登录尝试的状态机。
//!
//! 把任意一个提供商包在统一的 `start()` / `poll()` 合同后面。
//! 状态只会沿 `Idle -> Waiting -> {Waiting, Scanned} ->
//! {Confirmed, Expired}` 推进；到达终态后这次尝试的生命周期
//! 即告结束，想重试就再调一次 `start()` 换一个全新的凭证。

use tracing::{debug, info};

use crate::{
    error::{QrLoginError, Result},
    model::{LoginArtifact, PollResult, PollStatus},
    providers::QrLoginProvider,
};

/// 会话的内部状态。
#[derive(Debug, Clone)]
enum SessionState {
    /// 尚未调用 `start()`。
    Idle,
    /// 登录尝试进行中，持有当前凭证的 `session_key`。
    InProgress {
        session_key: String,
        status: PollStatus,
    },
    /// 已到达终态（成功或过期）。
    Terminated(PollStatus),
}

/// 一次扫码登录的会话。
///
/// 同一个实例上的 `start()` 和 `poll()` 通过 `&mut self` 天然
/// 串行；不同的会话实例彼此完全独立，可以并发推进。
/// 进程重启后进行中的登录会丢失，只能从 `start()` 重来。
pub struct QrLoginSession {
    provider: Box<dyn QrLoginProvider>,
    state: SessionState,
}

impl QrLoginSession {
    /// 用一个提供商实例创建会话，初始状态为 `Idle`。
    #[must_use]
    pub fn new(provider: Box<dyn QrLoginProvider>) -> Self {
        Self {
            provider,
            state: SessionState::Idle,
        }
    }

    /// 当前使用的提供商名称。
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// 当前的轮询状态；`Idle` 状态下为 `None`。
    #[must_use]
    pub fn status(&self) -> Option<PollStatus> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::InProgress { status, .. } => Some(*status),
            SessionState::Terminated(status) => Some(*status),
        }
    }

    /// 发起一次新的登录尝试。
    ///
    /// 任何状态下都可以调用：旧凭证随之作废（远端不会被撤销，
    /// 只是被放弃），会话转入 `Waiting`。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含用于展示的 [`LoginArtifact`]。
    pub async fn start(&mut self) -> Result<LoginArtifact> {
        let artifact = self.provider.create_artifact().await?;
        debug!(
            provider = self.provider.name(),
            "登录尝试已发起，进入等待扫码状态"
        );
        self.state = SessionState::InProgress {
            session_key: artifact.session_key.clone(),
            status: PollStatus::Waiting,
        };
        Ok(artifact)
    }

    /// 查询一次扫码状态并推进状态机。
    ///
    /// 轮询节奏由调用方掌握，这里不做任何限速；建议间隔
    /// 2~3 秒，接口是逆向出来的，没有公开的限流合同。
    ///
    /// 瞬态的网络错误（[`QrLoginError::is_transient`]）不会改变
    /// 会话状态，调用方可以重试同一次轮询。
    ///
    /// # 错误
    /// 未 `start()` 或已到达终态时返回 [`QrLoginError::InvalidState`]。
    pub async fn poll(&mut self) -> Result<PollResult> {
        let session_key = match &self.state {
            SessionState::Idle => {
                return Err(QrLoginError::InvalidState(
                    "会话尚未 start()，不能轮询".to_string(),
                ));
            }
            SessionState::Terminated(status) => {
                return Err(QrLoginError::InvalidState(format!(
                    "会话已到达终态 {status:?}，请重新 start()"
                )));
            }
            SessionState::InProgress { session_key, .. } => session_key.clone(),
        };

        // 传输层错误在这里用 `?` 直接冒泡，状态保持不变
        let result = self.provider.check_status(&session_key).await?;

        if result.status.is_terminal() {
            info!(
                provider = self.provider.name(),
                status = ?result.status,
                "登录尝试结束"
            );
            self.state = SessionState::Terminated(result.status);
        } else {
            self.state = SessionState::InProgress {
                session_key,
                status: result.status,
            };
        }

        Ok(result)
    }
}
