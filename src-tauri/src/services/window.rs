//! # 窗口宿主
//!
//! 管理唯一的主窗口：创建指向版本页面的窗口，并向它推送状态消息。
//!
//! 窗口引用保存在 `Mutex<Option<WebviewWindow>>` 中，窗口销毁时清空。
//! 之后到达的状态消息只记录调试日志，不会因为窗口不存在而出错。

use std::sync::{Arc, Mutex};

use tauri::{
    AppHandle, Emitter, Runtime, WebviewUrl, WebviewWindow, WebviewWindowBuilder, WindowEvent,
};

use crate::models::update::AppIdentity;
use crate::services::notifier::StatusRelay;
use crate::utils::path;

/// 主窗口标签（与 `capabilities/default.json` 中的 `windows` 对应）
pub const MAIN_WINDOW_LABEL: &str = "main";

/// 状态消息事件名，版本页面通过 `listen("message", ...)` 接收
pub const STATUS_EVENT: &str = "message";

/// 窗口宿主
pub struct WindowHost<R: Runtime> {
    /// 当前主窗口：窗口销毁后为 `None`
    window: Mutex<Option<WebviewWindow<R>>>,
}

impl<R: Runtime> WindowHost<R> {
    /// 创建尚未关联窗口的宿主
    pub fn new() -> Self {
        Self {
            window: Mutex::new(None),
        }
    }

    /// 创建主窗口并加载 `version.html#v<版本号>`
    ///
    /// 调试构建下自动打开开发者工具。
    ///
    /// # 错误
    /// 窗口创建失败时返回 Tauri 错误
    pub fn create_window(self: &Arc<Self>, app: &AppHandle<R>, identity: &AppIdentity) -> tauri::Result<()> {
        let url = WebviewUrl::App(path::version_page_path(&identity.version).into());
        let window = WebviewWindowBuilder::new(app, MAIN_WINDOW_LABEL, url)
            .title(identity.name.as_str())
            .inner_size(800.0, 600.0)
            .build()?;

        #[cfg(debug_assertions)]
        window.open_devtools();

        self.attach(window);
        Ok(())
    }

    /// 关联窗口，并在窗口销毁时清空引用
    fn attach(self: &Arc<Self>, window: WebviewWindow<R>) {
        // 使用弱引用，避免窗口回调与宿主互相持有
        let host = Arc::downgrade(self);
        window.on_window_event(move |event| {
            if let Some(host) = host.upgrade() {
                host.handle_window_event(event);
            }
        });

        if let Ok(mut slot) = self.window.lock() {
            *slot = Some(window);
        }
    }

    /// 处理窗口事件：`Destroyed` 时释放窗口引用
    fn handle_window_event(&self, event: &WindowEvent) {
        if let WindowEvent::Destroyed = event {
            if let Ok(mut slot) = self.window.lock() {
                if slot.take().is_some() {
                    log::info!("主窗口已关闭");
                }
            }
        }
    }

    fn current_window(&self) -> Option<WebviewWindow<R>> {
        self.window.lock().ok().and_then(|slot| slot.clone())
    }
}

impl<R: Runtime> Default for WindowHost<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Runtime> StatusRelay for WindowHost<R> {
    fn relay(&self, text: &str) -> bool {
        // 先取出窗口句柄再发送，不在持锁期间调用 emit
        let Some(window) = self.current_window() else {
            log::debug!("主窗口不存在，丢弃状态消息: {}", text);
            return false;
        };

        match window.emit(STATUS_EVENT, text) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("推送状态消息失败: {}", e);
                false
            }
        }
    }
}
