//! # 更新器配置数据模型
//!
//! 对应配置目录下的 `updater.json`。所有字段都有默认值，
//! 文件缺失或只写了部分字段时均可正常加载。

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// 更新器配置
///
/// 对应 JSON 文件示例：
/// ```json
/// {
///   "checkOnStartup": true,
///   "startupCheckDelaySecs": 9,
///   "installDelayMs": 1,
///   "autoDownload": true,
///   "autoInstallOnAppQuit": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdaterSettings {
    /// 启动后是否自动检查更新
    pub check_on_startup: bool,

    /// 启动检查的延迟（秒）：保证首条状态消息发送前窗口已经存在
    pub startup_check_delay_secs: u64,

    /// 用户确认安装后到真正开始安装的延迟（毫秒），让对话框先完整关闭
    pub install_delay_ms: u64,

    /// 发现新版本后是否立即下载
    pub auto_download: bool,

    /// 用户选择 "Later" 时，是否在应用正常退出时安装已下载的更新
    pub auto_install_on_app_quit: bool,
}

impl Default for UpdaterSettings {
    fn default() -> Self {
        Self {
            check_on_startup: true,
            startup_check_delay_secs: 9,
            install_delay_ms: 1,
            auto_download: true,
            auto_install_on_app_quit: true,
        }
    }
}

impl UpdaterSettings {
    pub fn startup_check_delay(&self) -> Duration {
        Duration::from_secs(self.startup_check_delay_secs)
    }

    pub fn install_delay(&self) -> Duration {
        Duration::from_millis(self.install_delay_ms)
    }
}
