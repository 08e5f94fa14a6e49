//! # 安装确认对话框
//!
//! 基于 `tauri-plugin-dialog` 的原生消息框实现 `InstallPrompt`。
//! 对话框是平台原生模态的，但不阻塞事件循环：结果通过回调异步返回。

use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use crate::models::update::{InstallPromptRequest, PromptChoice};
use crate::services::notifier::{InstallPrompt, PromptResponder};

pub struct DialogPrompt {
    app: AppHandle,
}

impl DialogPrompt {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl InstallPrompt for DialogPrompt {
    fn ask(&self, request: InstallPromptRequest, respond: PromptResponder) {
        // OK 按钮即 "Install and Relaunch"，为默认选中项；关闭对话框视为 "Later"
        self.app
            .dialog()
            .message(request.message)
            .title(request.title)
            .kind(MessageDialogKind::Info)
            .buttons(MessageDialogButtons::OkCancelCustom(
                request.install_label,
                request.later_label,
            ))
            .show(move |confirmed| {
                respond(if confirmed {
                    PromptChoice::InstallAndRelaunch
                } else {
                    PromptChoice::Later
                })
            });
    }
}
