//! # 业务逻辑服务模块
//!
//! 包含更新流程的核心实现，与 Tauri command 层解耦：
//! - `notifier` - 更新通知器：把生命周期事件转为状态消息和安装决策
//! - `release_notes` - 安装确认对话框的文本组装
//! - `progress` - 下载进度统计
//! - `scheduler` - 可取消的延迟任务
//! - `settings` - 更新器配置加载
//! - `window` - 窗口宿主：主窗口创建与状态消息推送
//! - `prompt` - 基于原生对话框的安装确认
//! - `feed` - 更新源客户端：检查、下载、安装的事件流程
//! - `plugin_backend` - 基于 tauri-plugin-updater 的更新后端
//! - `update_service` - 上述组件的组合与生命周期管理

pub mod feed;
pub mod notifier;
pub mod plugin_backend;
pub mod progress;
pub mod prompt;
pub mod release_notes;
pub mod scheduler;
pub mod settings;
pub mod update_service;
pub mod window;
