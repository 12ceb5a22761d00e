//! 网易云扫码登录接口的响应模型。

use serde::Deserialize;

/// unikey 生成接口的响应。
#[derive(Debug, Deserialize)]
pub struct UnikeyResponse {
    /// 业务状态码，镜像服务正常时为 200。
    pub code: Option<i64>,
    /// 载荷，`unikey` 嵌在里面。
    pub data: Option<UnikeyData>,
}

/// unikey 响应的载荷部分。
#[derive(Debug, Deserialize)]
pub struct UnikeyData {
    /// 一次性登录密钥。
    pub unikey: Option<String>,
}

/// 轮询接口的响应。
#[derive(Debug, Deserialize)]
pub struct QrPollResponse {
    /// 协议状态码：801 等待、802 已扫码、803 成功，其余视为过期。
    pub code: Option<i64>,
    /// 接口附带的提示文本。
    pub message: Option<String>,
    /// 已扫码状态下可能附带的用户昵称。
    pub nickname: Option<String>,
}
