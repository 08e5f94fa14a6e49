//! # 延迟任务调度
//!
//! 启动后的更新检查和确认后的安装都是"延迟一段时间后执行一次"的任务。
//! 这些任务运行在 Tauri 的 async runtime 上，并保留 `JoinHandle`，
//! 应用退出时统一取消，避免进程收尾阶段再触发检查或安装。
//!
//! ## 线程安全
//! 句柄列表由 `Mutex` 保护；`shutdown` 之后的调度请求会被拒绝。

use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tauri::async_runtime::{self, JoinHandle};

/// 已调度任务：标签仅用于日志
struct ScheduledTask {
    label: &'static str,
    handle: JoinHandle<()>,
}

/// 可取消的单次延迟任务集合
pub struct DeferredTasks {
    tasks: Mutex<Vec<ScheduledTask>>,
    shut_down: AtomicBool,
}

impl DeferredTasks {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            shut_down: AtomicBool::new(false),
        }
    }

    /// 在 `delay` 之后执行一次 `task`
    ///
    /// # 返回值
    /// 已关闭时返回 `false`，任务不会被调度
    pub fn schedule<F>(&self, label: &'static str, delay: Duration, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(mut tasks) = self.tasks.lock() else {
            return false;
        };
        // 在持有锁的情况下检查，避免与 shutdown 交错
        if self.shut_down.load(Ordering::SeqCst) {
            log::warn!("应用正在退出，忽略延迟任务: {}", label);
            return false;
        }

        let handle = async_runtime::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });

        tasks.retain(|t| !t.handle.inner().is_finished());
        tasks.push(ScheduledTask { label, handle });
        log::debug!("已调度延迟任务: {}（{:?} 后执行）", label, delay);
        true
    }

    /// 尚未完成的任务标签
    #[cfg(test)]
    pub fn pending_labels(&self) -> Vec<&'static str> {
        self.tasks
            .lock()
            .map(|tasks| {
                tasks
                    .iter()
                    .filter(|t| !t.handle.inner().is_finished())
                    .map(|t| t.label)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 取消全部未执行的任务，之后不再接受新任务
    ///
    /// 可重复调用。
    pub fn shutdown(&self) {
        // 先置位：即使锁已中毒，之后的调度请求也会因标志位被拒绝
        self.shut_down.store(true, Ordering::SeqCst);
        if let Ok(mut tasks) = self.tasks.lock() {
            for task in tasks.drain(..) {
                if !task.handle.inner().is_finished() {
                    log::info!("取消延迟任务: {}", task.label);
                }
                task.handle.abort();
            }
        }
    }
}

impl Default for DeferredTasks {
    fn default() -> Self {
        Self::new()
    }
}
