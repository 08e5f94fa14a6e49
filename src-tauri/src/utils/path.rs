//! # 路径工具函数
//!
//! 提供与文件路径相关的工具函数，包括：
//! - 获取更新器配置文件路径（`<配置目录>/<应用标识符>/updater.json`）
//! - 生成版本页面的应用内路径（`version.html#v<版本号>`）

use std::path::PathBuf;

/// 更新器配置文件名
pub const SETTINGS_FILE_NAME: &str = "updater.json";

/// 版本页面文件名（位于 `public/` 前端资源目录）
pub const VERSION_PAGE: &str = "version.html";

/// 获取更新器配置文件的绝对路径
///
/// 使用 `dirs` crate 获取跨平台的配置目录，再按应用标识符分目录，
/// 避免与其他应用的配置混在一起。
///
/// # 参数
/// - `identifier` - 应用标识符（`tauri.conf.json` 中的 `identifier`）
///
/// # 错误
/// 如果无法确定系统配置目录，返回错误信息。
///
/// # 示例
/// - Windows: `C:\Users\username\AppData\Roaming\org.lhtml.updatershell\updater.json`
/// - Linux: `/home/username/.config/org.lhtml.updatershell/updater.json`
pub fn get_settings_path(identifier: &str) -> Result<PathBuf, String> {
    let config_dir = dirs::config_dir().ok_or_else(|| "无法获取系统配置目录".to_string())?;
    Ok(config_dir.join(identifier).join(SETTINGS_FILE_NAME))
}

/// 生成版本页面路径，版本号放在 URL 片段中
///
/// 页面脚本读取 `location.hash`（形如 `#v1.2.0`）并显示版本号。
pub fn version_page_path(version: &str) -> String {
    format!("{}#v{}", VERSION_PAGE, version)
}
