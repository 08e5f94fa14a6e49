//! # 更新器配置加载服务
//!
//! 从 `updater.json` 读取 `UpdaterSettings`：
//! - 文件不存在时返回默认配置（首次运行的常见情况）
//! - 只写了部分字段时，其余字段使用默认值
//! - JSON 格式错误时返回错误信息，由调用方决定是否回退

use std::path::Path;

use crate::models::settings::UpdaterSettings;

/// 读取更新器配置文件
///
/// # 参数
/// - `path` - `updater.json` 的绝对路径
///
/// # 错误
/// 文件存在但无法读取或 JSON 解析失败时返回错误
pub fn load_settings(path: &Path) -> Result<UpdaterSettings, String> {
    if !path.exists() {
        return Ok(UpdaterSettings::default());
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| format!("读取更新器配置文件失败: {}", e))?;

    serde_json::from_str(&content).map_err(|e| format!("解析更新器配置文件失败: {}", e))
}

/// 读取更新器配置文件，失败时记录警告并使用默认配置
///
/// 配置错误不应阻止应用启动，更新检查仍按默认参数进行。
pub fn load_settings_or_default(path: &Path) -> UpdaterSettings {
    match load_settings(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{}（{}），使用默认配置", e, path.display());
            UpdaterSettings::default()
        }
    }
}
