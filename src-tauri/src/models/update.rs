//! # 更新生命周期数据模型
//!
//! 定义应用身份（AppIdentity）、更新源返回的更新信息（UpdateInfo）、
//! 下载进度（DownloadProgress）以及更新检查过程中产生的事件（UpdateEvent）。
//!
//! 所有结构体在创建后不再修改，仅在事件处理链路中按值传递。
//! `AppIdentity` 和 `UpdateInfo` 派生 `Serialize`，可直接通过 Tauri IPC 返回给前端。

use serde::{Deserialize, Serialize};

/// 应用身份
///
/// 由名称和当前版本组成，在启动时从 `tauri::PackageInfo` 读取一次。
/// 用于显示文本、版本页面 URL，同时也是更新源进行版本比较的基准。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppIdentity {
    /// 应用名称（`tauri.conf.json` 中的 `productName`）
    pub name: String,

    /// 当前版本号（semver 字符串）
    pub version: String,
}

impl AppIdentity {
    /// 由应用名称和版本号创建
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// 从 Tauri 的包信息构建应用身份
    pub fn from_package_info(info: &tauri::PackageInfo) -> Self {
        Self::new(info.name.clone(), info.version.to_string())
    }
}

/// 更新信息
///
/// 由更新源在 "available" 和 "downloaded" 事件中提供。
/// 除发布名称和发布说明外不假设任何其他结构，也不做校验。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    /// 新版本号
    pub version: String,

    /// 发布名称：更新源未提供时与版本号相同
    pub release_name: String,

    /// 发布说明：可能为多行文本，也可能不存在
    pub release_notes: Option<String>,

    /// 发布日期：更新源提供的原始日期文本
    pub release_date: Option<String>,
}

impl UpdateInfo {
    /// 以版本号作为发布名称创建更新信息
    pub fn new(version: impl Into<String>, release_notes: Option<String>) -> Self {
        let version = version.into();
        Self {
            release_name: version.clone(),
            version,
            release_notes,
            release_date: None,
        }
    }
}

/// 下载进度
///
/// 字段含义与常见更新器的进度对象一致：已传输字节数、总字节数、
/// 百分比（总大小未知时为 `None`）以及平均下载速度。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadProgress {
    /// 已传输字节数
    pub transferred: u64,

    /// 更新包总字节数：更新源未提供 Content-Length 时为 `None`
    pub total: Option<u64>,

    /// 完成百分比（0-100）：总大小未知时为 `None`
    pub percent: Option<f64>,

    /// 自下载开始以来的平均速度（字节/秒）
    pub bytes_per_second: u64,
}

/// 更新生命周期事件
///
/// 更新源在一次检查过程中按顺序产生这些事件，
/// 由 `UpdateNotifier::handle` 统一消费。
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateEvent {
    /// 开始检查更新
    Checking,
    /// 发现新版本，尚未开始下载
    Available(UpdateInfo),
    /// 没有可用更新
    NotAvailable { current_version: String },
    /// 检查或下载失败（不影响应用运行）
    Error(String),
    /// 下载进行中，每个数据块触发一次
    DownloadProgress(DownloadProgress),
    /// 更新包已完整下载并通过校验，每次检查最多出现一次
    Downloaded(UpdateInfo),
}

impl UpdateEvent {
    /// 事件的语义名称
    pub fn name(&self) -> &'static str {
        match self {
            UpdateEvent::Checking => "checking-for-update",
            UpdateEvent::Available(_) => "update-available",
            UpdateEvent::NotAvailable { .. } => "update-not-available",
            UpdateEvent::Error(_) => "error",
            UpdateEvent::DownloadProgress(_) => "download-progress",
            UpdateEvent::Downloaded(_) => "update-downloaded",
        }
    }

    /// 生成发送给窗口和日志的状态文本（始终非空）
    pub fn status_text(&self) -> String {
        match self {
            UpdateEvent::Checking => "Checking for update...".to_string(),
            UpdateEvent::Available(info) => {
                format!("Update available: {}.", info.release_name)
            }
            UpdateEvent::NotAvailable { current_version } => {
                format!("Update not available. Current version {} is the latest.", current_version)
            }
            UpdateEvent::Error(err) => format!("Error in auto-updater: {}", err),
            UpdateEvent::DownloadProgress(progress) => match (progress.percent, progress.total) {
                (Some(percent), Some(total)) => format!(
                    "Download progress: {:.1}% ({}/{} bytes, {} B/s)",
                    percent, progress.transferred, total, progress.bytes_per_second
                ),
                _ => format!(
                    "Download progress: {} bytes ({} B/s)",
                    progress.transferred, progress.bytes_per_second
                ),
            },
            UpdateEvent::Downloaded(info) => {
                format!("Update downloaded: {}.", info.release_name)
            }
        }
    }
}

/// 安装确认对话框的用户选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    /// "Install and Relaunch"（默认按钮）
    InstallAndRelaunch,
    /// "Later" 或直接关闭对话框
    Later,
}

/// 安装确认对话框的内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPromptRequest {
    pub title: String,
    pub message: String,
    pub install_label: String,
    pub later_label: String,
}
