//! # 通用工具函数
//!
//! - `path` - 配置文件路径与版本页面路径

pub mod path;
