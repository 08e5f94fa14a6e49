//! # Updater Shell - Tauri 应用核心初始化模块
//!
//! 一个最小化的桌面应用外壳：打开一个显示当前版本的窗口，
//! 并在启动后自动检查远程更新源，把更新过程的状态推送到窗口。
//!
//! 本模块负责：
//! - 注册 Tauri 插件（日志、对话框、更新器）
//! - 构建应用菜单、创建主窗口
//! - 组装更新服务并调度启动检查
//! - 应用退出时取消未执行的延迟任务
//!
//! ## 模块结构
//! - `commands/` - Tauri command 处理函数（IPC 接口层）
//! - `models/` - 数据模型
//! - `services/` - 更新流程的核心逻辑
//! - `utils/` - 通用工具函数
//! - `menu` - 应用菜单
//! - `test_utils` - 单元测试共用的替身和等待工具（仅测试构建）

mod commands;
mod menu;
mod models;
mod services;
mod utils;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use tauri::{Manager, RunEvent};
use tauri_plugin_log::{Target, TargetKind};

use models::update::AppIdentity;
use services::feed::UpdateFeed;
use services::notifier::UpdateNotifier;
use services::plugin_backend::PluginBackend;
use services::prompt::DialogPrompt;
use services::scheduler::DeferredTasks;
use services::settings;
use services::update_service::UpdateService;
use services::window::WindowHost;
use utils::path;

/// 日志文件名（位于系统日志目录下）
const LOG_FILE_NAME: &str = "updater";

#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Tauri 应用启动函数
///
/// # Panics
/// 如果 Tauri 应用启动失败（例如配置文件缺失），将通过 `.expect()` 触发 panic。
pub fn run() {
    tauri::Builder::default()
        // 日志同时输出到标准输出和系统日志目录，便于排查更新问题
        .plugin(
            tauri_plugin_log::Builder::default()
                .targets([
                    Target::new(TargetKind::Stdout),
                    Target::new(TargetKind::LogDir {
                        file_name: Some(LOG_FILE_NAME.to_string()),
                    }),
                ])
                .level(log::LevelFilter::Info)
                .build(),
        )
        // 对话框插件：安装确认使用原生消息框
        .plugin(tauri_plugin_dialog::init())
        // 更新器插件：endpoints 和 pubkey 在 tauri.conf.json 的 plugins.updater 中配置
        .plugin(tauri_plugin_updater::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            commands::updater::get_app_identity,
            commands::updater::check_for_updates,
        ])
        .on_menu_event(menu::handle_menu_event)
        .setup(|app| {
            log::info!("App starting...");

            let identity = AppIdentity::from_package_info(app.package_info());
            let settings = match path::get_settings_path(&app.config().identifier) {
                Ok(settings_path) => settings::load_settings_or_default(&settings_path),
                Err(e) => {
                    log::warn!("{}，使用默认配置", e);
                    Default::default()
                }
            };

            let app_menu = menu::build_app_menu(app.handle(), &identity)?;
            app.set_menu(app_menu)?;

            let window_host = Arc::new(WindowHost::new());
            window_host.create_window(app.handle(), &identity)?;

            let tasks = Arc::new(DeferredTasks::new());
            let feed = Arc::new(UpdateFeed::new(
                PluginBackend::new(app.handle().clone()),
                settings.clone(),
            ));
            let notifier = Arc::new(UpdateNotifier::new(
                identity,
                window_host,
                Arc::new(DialogPrompt::new(app.handle().clone())),
                feed.clone(),
                tasks.clone(),
                settings.install_delay(),
            ));

            let service = UpdateService::new(notifier, feed, tasks);
            if settings.check_on_startup {
                service.schedule_startup_check(settings.startup_check_delay());
            } else {
                log::info!("已关闭启动时检查更新");
            }
            app.manage(service);

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while running tauri application")
        .run(|app, event| match event {
            // 最后一个窗口关闭或菜单 Quit 都会触发退出请求
            RunEvent::ExitRequested { .. } => {
                log::info!("应用收到退出请求");
            }
            RunEvent::Exit => {
                if let Some(service) = app.try_state::<UpdateService>() {
                    service.shutdown();
                }
            }
            _ => {}
        });
}
