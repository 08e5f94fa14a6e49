//! # 更新服务
//!
//! 把更新源客户端、更新通知器和延迟任务组合在一起，作为 Tauri managed state 注册。
//! 负责启动后的延迟检查、前端触发的手动检查，以及应用退出时的收尾。

use std::sync::Arc;
use std::time::Duration;

use crate::models::update::AppIdentity;
use crate::services::feed::{UpdateBackend, UpdateFeed};
use crate::services::notifier::UpdateNotifier;
use crate::services::plugin_backend::PluginBackend;
use crate::services::scheduler::DeferredTasks;

/// 更新服务
///
/// 生产环境中的后端为 `PluginBackend<tauri::Wry>`，command 层直接使用默认类型参数。
pub struct UpdateService<B: UpdateBackend = PluginBackend<tauri::Wry>> {
    /// 事件消费方：日志、窗口状态和安装确认
    notifier: Arc<UpdateNotifier>,
    /// 事件产生方：检查、下载和安装
    feed: Arc<UpdateFeed<B>>,
    /// 启动检查、手动检查和安装触发共用的延迟任务
    tasks: Arc<DeferredTasks>,
}

impl<B: UpdateBackend> UpdateService<B> {
    /// 组合更新服务
    ///
    /// `notifier` 的安装器应当就是 `feed`，二者共享同一个 `tasks`。
    pub fn new(
        notifier: Arc<UpdateNotifier>,
        feed: Arc<UpdateFeed<B>>,
        tasks: Arc<DeferredTasks>,
    ) -> Self {
        Self {
            notifier,
            feed,
            tasks,
        }
    }

    /// 应用名称和当前版本
    pub fn identity(&self) -> &AppIdentity {
        self.notifier.identity()
    }

    /// 启动后延迟检查更新
    ///
    /// 延迟保证首条状态消息发送时窗口已经创建完成。
    pub fn schedule_startup_check(&self, delay: Duration) -> bool {
        self.schedule_check("startup-update-check", delay)
    }

    /// 立即检查更新（前端手动触发）
    ///
    /// # 错误
    /// 应用正在退出时返回错误
    pub fn check_now(&self) -> Result<(), String> {
        if self.schedule_check("manual-update-check", Duration::ZERO) {
            Ok(())
        } else {
            Err("应用正在退出，无法检查更新".to_string())
        }
    }

    fn schedule_check(&self, label: &'static str, delay: Duration) -> bool {
        let feed = Arc::clone(&self.feed);
        let notifier = Arc::clone(&self.notifier);
        self.tasks.schedule(label, delay, async move {
            feed.check_for_updates(move |event| notifier.handle(event))
                .await;
        })
    }

    /// 应用退出：取消所有延迟任务，然后按配置安装已下载的更新
    pub fn shutdown(&self) {
        self.tasks.shutdown();
        self.feed.install_pending_on_exit();
    }
}
