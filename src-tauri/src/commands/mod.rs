//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数：
//! - `updater` - 应用身份查询和手动检查更新

pub mod updater;
