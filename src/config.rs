//! 客户端与各提供商接口地址的配置。
//!
//! 默认值即线上真实接口；所有地址都可覆盖，既方便走代理，
//! 也让测试可以指向本地的桩服务。

use std::time::Duration;

/// 模拟浏览器的 User-Agent。部分提供商会拒绝没有 UA 的请求。
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// 整个客户端的配置。
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// 单次 HTTP 请求的超时时间。
    pub timeout: Duration,
    /// 发往提供商的 User-Agent。
    pub user_agent: String,
    /// QQ 登录接口地址。
    pub qq: QqEndpoints,
    /// 网易云登录接口地址。
    pub netease: NeteaseEndpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: BROWSER_USER_AGENT.to_string(),
            qq: QqEndpoints::default(),
            netease: NeteaseEndpoints::default(),
        }
    }
}

/// QQ 扫码登录用到的两个接口。
#[derive(Debug, Clone)]
pub struct QqEndpoints {
    /// 返回二维码 PNG 图片的接口。
    pub qr_show: String,
    /// 轮询扫码状态的接口。
    pub qr_poll: String,
}

impl Default for QqEndpoints {
    fn default() -> Self {
        Self {
            qr_show: "https://ssl.ptlogin2.qq.com/ptqrshow".to_string(),
            qr_poll: "https://ssl.ptlogin2.qq.com/ptqrlogin".to_string(),
        }
    }
}

/// 网易云扫码登录用到的接口。
///
/// 官方的 unikey 接口要求私有的请求加密，这里默认走第三方
/// 镜像服务，属于继承自原设计的已知保真缺口。
#[derive(Debug, Clone)]
pub struct NeteaseEndpoints {
    /// 生成一次性 `unikey` 的接口（镜像服务）。
    pub unikey: String,
    /// 轮询扫码状态的接口。
    pub qr_poll: String,
    /// 外部二维码渲染服务。
    pub qr_render: String,
    /// 手机端扫到的登录目标页，`codekey` 会拼在后面。
    pub login_target: String,
}

impl Default for NeteaseEndpoints {
    fn default() -> Self {
        Self {
            unikey: "https://netease-cloud-music-api-liard.vercel.app/login/qr/key".to_string(),
            qr_poll: "https://music.163.com/api/login/qrcode/client/login".to_string(),
            qr_render: "https://api.qrserver.com/v1/create-qr-code/".to_string(),
            login_target: "https://music.163.com/login".to_string(),
        }
    }
}
