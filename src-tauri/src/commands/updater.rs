//! # 更新相关 Tauri Commands
//!
//! 版本页面通过以下 commands 与后端交互：
//! - `get_app_identity` - 获取应用名称和当前版本
//! - `check_for_updates` - 立即检查更新，进度通过 `message` 事件推送回页面

use tauri::State;

use crate::models::update::AppIdentity;
use crate::services::update_service::UpdateService;

/// 获取应用名称和当前版本
#[tauri::command]
pub async fn get_app_identity(service: State<'_, UpdateService>) -> Result<AppIdentity, String> {
    Ok(service.identity().clone())
}

/// 立即检查更新
///
/// 只负责发起检查，结果以状态消息的形式异步推送到窗口。
///
/// # 错误
/// 应用正在退出时返回错误信息
#[tauri::command]
pub async fn check_for_updates(service: State<'_, UpdateService>) -> Result<(), String> {
    service.check_now()
}
