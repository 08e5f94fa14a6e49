//! # 基于 tauri-plugin-updater 的更新后端
//!
//! 访问 `tauri.conf.json` 中 `plugins.updater.endpoints` 配置的更新源。
//! 版本比较和签名校验均由更新器插件完成。

use async_trait::async_trait;
use tauri::{AppHandle, Runtime};
use tauri_plugin_updater::{Update, UpdaterExt};

use crate::models::update::UpdateInfo;
use crate::services::feed::{Result, UpdateBackend, UpdateError};

/// 通过 `UpdaterExt::updater()` 访问更新源的生产后端
pub struct PluginBackend<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> PluginBackend<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }
}

#[async_trait]
impl<R: Runtime> UpdateBackend for PluginBackend<R> {
    type Release = Update;

    fn current_version(&self) -> String {
        self.app.package_info().version.to_string()
    }

    async fn check(&self) -> Result<Option<Update>> {
        let updater = self
            .app
            .updater()
            .map_err(|e| UpdateError::Config(e.to_string()))?;
        updater
            .check()
            .await
            .map_err(|e| UpdateError::Check(e.to_string()))
    }

    /// 更新源不区分发布名称和版本号，发布名称使用版本号
    fn describe(&self, release: &Update) -> UpdateInfo {
        UpdateInfo {
            release_date: release.date.map(|date| date.to_string()),
            ..UpdateInfo::new(release.version.clone(), release.body.clone())
        }
    }

    async fn download(
        &self,
        release: &Update,
        on_chunk: &mut (dyn FnMut(usize, Option<u64>) + Send),
    ) -> Result<Vec<u8>> {
        release
            .download(on_chunk, || log::debug!("更新包下载完成"))
            .await
            .map_err(|e| UpdateError::Download(e.to_string()))
    }

    fn install(&self, release: &Update, bytes: &[u8]) -> Result<()> {
        release
            .install(bytes)
            .map_err(|e| UpdateError::Install(e.to_string()))
    }

    fn relaunch(&self) {
        self.app.restart();
    }
}
