//! # 数据模型模块
//!
//! 定义更新流程中流转的数据结构：
//! - `update` - 应用身份、更新信息、下载进度以及六种更新生命周期事件
//! - `settings` - 更新器配置（`updater.json`）

pub mod settings;
pub mod update;
