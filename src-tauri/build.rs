//! # Updater Shell - Tauri Cargo 构建脚本
//!
//! 调用 `tauri_build::build()` 生成 Tauri 运行时所需的资源绑定代码、
//! 权限清单以及 Windows 平台的应用程序清单和资源文件。

fn main() {
  tauri_build::build()
}
