//! # 更新通知器
//!
//! 把更新源产生的生命周期事件转换为用户可见的状态和安装决策：
//! - 每个事件写一条 `info` 日志，并把同样的状态文本推送到窗口
//! - 仅 "downloaded" 事件有后续动作：弹出安装确认对话框，
//!   用户选择 "Install and Relaunch" 后延迟触发安装并重启
//!
//! ## 协作者
//! 通知器不直接依赖 Tauri 窗口、对话框或更新器插件，而是通过三个 trait 访问：
//! - `StatusRelay` - 窗口宿主的消息推送（窗口已关闭时为空操作）
//! - `InstallPrompt` - 原生确认对话框，结果通过回调异步返回
//! - `UpdateInstaller` - 更新源的"安装并重启"能力
//!
//! ## 错误语义
//! 更新源的任何错误都只作为信息处理：记录日志并显示状态文本，不重试、不弹错误框。

use std::sync::Arc;
use std::time::Duration;

use crate::models::update::{
    AppIdentity, InstallPromptRequest, PromptChoice, UpdateEvent, UpdateInfo,
};
use crate::services::release_notes;
use crate::services::scheduler::DeferredTasks;

/// 窗口状态消息推送
pub trait StatusRelay: Send + Sync {
    /// 推送一条状态文本
    ///
    /// # 返回值
    /// 窗口存在且消息已发出返回 `true`；没有窗口时不做任何事并返回 `false`
    fn relay(&self, text: &str) -> bool;
}

/// 用户对确认对话框的回应
pub type PromptResponder = Box<dyn FnOnce(PromptChoice) + Send + 'static>;

/// 安装确认对话框
pub trait InstallPrompt: Send + Sync {
    /// 显示对话框，用户作出选择（或关闭对话框）后调用 `respond`
    ///
    /// 实现不得阻塞调用线程。
    fn ask(&self, request: InstallPromptRequest, respond: PromptResponder);
}

/// 安装已下载的更新并重启应用
pub trait UpdateInstaller: Send + Sync {
    /// 安装已下载的更新后重启；没有已下载的更新时只记录警告
    fn quit_and_install(&self);
}

/// 更新通知器
///
/// 消费 `UpdateEvent`：记录日志、推送窗口状态，收到 `Downloaded` 时弹出安装确认。
pub struct UpdateNotifier {
    identity: AppIdentity,
    relay: Arc<dyn StatusRelay>,
    prompt: Arc<dyn InstallPrompt>,
    installer: Arc<dyn UpdateInstaller>,
    tasks: Arc<DeferredTasks>,
    install_delay: Duration,
}

impl UpdateNotifier {
    pub fn new(
        identity: AppIdentity,
        relay: Arc<dyn StatusRelay>,
        prompt: Arc<dyn InstallPrompt>,
        installer: Arc<dyn UpdateInstaller>,
        tasks: Arc<DeferredTasks>,
        install_delay: Duration,
    ) -> Self {
        Self {
            identity,
            relay,
            prompt,
            installer,
            tasks,
            install_delay,
        }
    }

    pub fn identity(&self) -> &AppIdentity {
        &self.identity
    }

    /// 处理一个更新生命周期事件
    ///
    /// 事件由同一个检查任务按顺序产生，因此这里不需要额外的互斥。
    pub fn handle(&self, event: UpdateEvent) {
        log::debug!("处理更新事件: {}", event.name());
        let status = event.status_text();
        self.send_status(&status);

        if let UpdateEvent::Downloaded(info) = event {
            self.prompt_install(&info);
        }
    }

    fn send_status(&self, text: &str) {
        log::info!("{}", text);
        self.relay.relay(text);
    }

    fn prompt_install(&self, info: &UpdateInfo) {
        let request = release_notes::build_install_prompt(&self.identity, info);

        let tasks = Arc::clone(&self.tasks);
        let installer = Arc::clone(&self.installer);
        let delay = self.install_delay;
        let version = info.version.clone();

        self.prompt.ask(
            request,
            Box::new(move |choice| match choice {
                PromptChoice::InstallAndRelaunch => {
                    log::info!("用户确认安装 {}，即将退出并安装", version);
                    // 延迟一小段时间，让对话框先关闭再开始退出流程
                    tasks.schedule("install-and-relaunch", delay, async move {
                        installer.quit_and_install();
                    });
                }
                PromptChoice::Later => {
                    log::info!("用户选择稍后安装 {}，将在下次重启时安装", version);
                }
            }),
        );
    }
}
