//! # 更新源客户端
//!
//! 负责一次完整的更新检查流程，并把过程转换为按顺序产生的 `UpdateEvent`：
//! - 检查是否有新版本
//! - 按配置自动下载更新包，保存在内存中等待安装
//! - 安装已下载的更新并重启，或在应用退出时静默安装
//!
//! 真正的网络访问、签名校验和安装由 `UpdateBackend` 完成，
//! 生产环境使用基于 `tauri-plugin-updater` 的 `PluginBackend`。

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::models::settings::UpdaterSettings;
use crate::models::update::{UpdateEvent, UpdateInfo};
use crate::services::notifier::UpdateInstaller;
use crate::services::progress::ProgressTracker;

/// 更新过程中的错误
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// 更新器插件未初始化或配置缺失
    #[error("更新器配置错误: {0}")]
    Config(String),

    /// 请求更新源或解析响应失败
    #[error("检查更新失败: {0}")]
    Check(String),

    /// 下载或校验更新包失败
    #[error("下载更新失败: {0}")]
    Download(String),

    /// 安装更新包失败
    #[error("安装更新失败: {0}")]
    Install(String),
}

pub type Result<T> = std::result::Result<T, UpdateError>;

/// 更新后端：访问远程更新源并执行安装
#[async_trait]
pub trait UpdateBackend: Send + Sync + 'static {
    /// 更新源返回的更新描述
    type Release: Send + Sync + 'static;

    /// 当前运行的版本号
    fn current_version(&self) -> String;

    /// 检查更新，没有新版本时返回 `None`
    async fn check(&self) -> Result<Option<Self::Release>>;

    /// 提取更新信息
    fn describe(&self, release: &Self::Release) -> UpdateInfo;

    /// 下载并校验更新包
    ///
    /// `on_chunk` 在每个数据块到达时调用：本块字节数、更新包总大小（可能未知）
    async fn download(
        &self,
        release: &Self::Release,
        on_chunk: &mut (dyn FnMut(usize, Option<u64>) + Send),
    ) -> Result<Vec<u8>>;

    /// 安装已下载的更新包
    fn install(&self, release: &Self::Release, bytes: &[u8]) -> Result<()>;

    /// 重启应用
    fn relaunch(&self);
}

/// 已下载、等待安装的更新
struct PendingUpdate<T> {
    release: T,
    info: UpdateInfo,
    bytes: Vec<u8>,
}

/// 更新源客户端
pub struct UpdateFeed<B: UpdateBackend> {
    backend: B,
    settings: UpdaterSettings,
    /// 同一时间只允许一次检查
    in_flight: AtomicBool,
    pending: Mutex<Option<PendingUpdate<B::Release>>>,
}

impl<B: UpdateBackend> UpdateFeed<B> {
    pub fn new(backend: B, settings: UpdaterSettings) -> Self {
        Self {
            backend,
            settings,
            in_flight: AtomicBool::new(false),
            pending: Mutex::new(None),
        }
    }

    /// 执行一次完整的更新检查
    ///
    /// 事件顺序：`Checking` →（`NotAvailable` | `Available` → `DownloadProgress`* → `Downloaded`），
    /// 任一步骤失败时以 `Error` 结束。已有检查在进行时不产生任何事件，直接返回。
    pub async fn check_for_updates<F>(&self, emit: F)
    where
        F: Fn(UpdateEvent) + Send + Sync,
    {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            log::info!("已有更新检查正在进行，忽略本次请求");
            return;
        }

        emit(UpdateEvent::Checking);
        if let Err(e) = self.run_check(&emit).await {
            emit(UpdateEvent::Error(e.to_string()));
        }

        self.in_flight.store(false, Ordering::SeqCst);
    }

    async fn run_check<F>(&self, emit: &F) -> Result<()>
    where
        F: Fn(UpdateEvent) + Send + Sync,
    {
        let Some(release) = self.backend.check().await? else {
            emit(UpdateEvent::NotAvailable {
                current_version: self.backend.current_version(),
            });
            return Ok(());
        };

        let info = self.backend.describe(&release);
        emit(UpdateEvent::Available(info.clone()));

        if !self.settings.auto_download {
            log::info!("已关闭自动下载，跳过 {} 的下载", info.version);
            return Ok(());
        }

        let mut tracker = ProgressTracker::new();
        let mut on_chunk = |chunk_len: usize, total: Option<u64>| {
            emit(UpdateEvent::DownloadProgress(
                tracker.advance(chunk_len as u64, total),
            ))
        };
        let bytes = self.backend.download(&release, &mut on_chunk).await?;

        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(PendingUpdate {
                release,
                info: info.clone(),
                bytes,
            });
        }
        emit(UpdateEvent::Downloaded(info));
        Ok(())
    }

    /// 已下载、尚未安装的更新
    pub fn pending_update(&self) -> Option<UpdateInfo> {
        self.pending
            .lock()
            .ok()
            .and_then(|pending| pending.as_ref().map(|p| p.info.clone()))
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn take_pending(&self) -> Option<PendingUpdate<B::Release>> {
        self.pending.lock().ok().and_then(|mut pending| pending.take())
    }

    /// 应用退出时安装已下载的更新（不重启）
    ///
    /// 仅在 `autoInstallOnAppQuit` 开启时生效，用户选择 "Later" 后的更新由此在下次启动前生效。
    ///
    /// # 返回值
    /// 实际安装了更新时返回 `true`
    pub fn install_pending_on_exit(&self) -> bool {
        if !self.settings.auto_install_on_app_quit {
            return false;
        }
        let Some(pending) = self.take_pending() else {
            return false;
        };

        log::info!("应用退出，安装已下载的更新 {}", pending.info.version);
        match self.backend.install(&pending.release, &pending.bytes) {
            Ok(()) => true,
            Err(e) => {
                log::error!("{}", e);
                false
            }
        }
    }
}

impl<B: UpdateBackend> UpdateInstaller for UpdateFeed<B> {
    fn quit_and_install(&self) {
        let Some(pending) = self.take_pending() else {
            log::warn!("没有已下载的更新可供安装");
            return;
        };

        log::info!("正在安装 {} 并重启...", pending.info.version);
        if let Err(e) = self.backend.install(&pending.release, &pending.bytes) {
            log::error!("{}", e);
            return;
        }
        self.backend.relaunch();
    }
}
