//! # 更新提示文本组装
//!
//! 更新下载完成后，把应用名称、发布名称和发布说明组装成安装确认对话框的内容。
//! 发布说明按行拆分，每段之后追加一个空行，便于在原生对话框中阅读。

use crate::models::update::{AppIdentity, InstallPromptRequest, UpdateInfo};

/// 确认按钮文本（默认选中）
pub const INSTALL_LABEL: &str = "Install and Relaunch";

/// 取消按钮文本
pub const LATER_LABEL: &str = "Later";

/// 按行拆分发布说明
///
/// 以 `\n` 为分隔符，并去掉行尾的 `\r`（兼容 CRLF）。
/// 包含 N 个换行符的文本总是得到 N+1 段。
pub fn split_release_notes(notes: &str) -> impl Iterator<Item = &str> {
    notes
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// 组装更新提示正文
///
/// 格式：`<应用名> <发布名> is now available. ...`，
/// 发布说明非空时追加 `Release notes:` 段落。
pub fn compose_release_message(app_name: &str, info: &UpdateInfo) -> String {
    let mut message = format!(
        "{} {} is now available. It will be installed the next time you restart the application.",
        app_name, info.release_name
    );

    if let Some(notes) = info.release_notes.as_deref().filter(|n| !n.is_empty()) {
        message.push_str("\n\nRelease notes:\n");
        for block in split_release_notes(notes) {
            message.push_str(block);
            message.push_str("\n\n");
        }
    }

    message
}

/// 构建安装确认对话框的完整内容
pub fn build_install_prompt(identity: &AppIdentity, info: &UpdateInfo) -> InstallPromptRequest {
    InstallPromptRequest {
        title: format!("A new version of {} has been downloaded", identity.name),
        message: compose_release_message(&identity.name, info),
        install_label: INSTALL_LABEL.to_string(),
        later_label: LATER_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes_section(message: &str) -> &str {
        message
            .split_once("Release notes:\n")
            .map(|(_, notes)| notes)
            .expect("缺少 Release notes 段落")
    }

    #[test]
    fn test_message_without_notes() {
        let info = UpdateInfo::new("1.2.0", None);
        let message = compose_release_message("Demo", &info);
        assert_eq!(
            message,
            "Demo 1.2.0 is now available. It will be installed the next time you restart the application."
        );
        assert!(!message.contains("Release notes:"));
    }

    #[test]
    fn test_empty_notes_are_treated_as_absent() {
        let info = UpdateInfo::new("1.2.0", Some(String::new()));
        assert!(!compose_release_message("Demo", &info).contains("Release notes:"));
    }

    #[test]
    fn test_notes_split_into_blank_line_separated_blocks() {
        let info = UpdateInfo::new("1.2.0", Some("Fixed crash\nFaster startup\nNew icon".into()));
        let message = compose_release_message("Demo", &info);

        let section = notes_section(&message);
        assert_eq!(section, "Fixed crash\n\nFaster startup\n\nNew icon\n\n");
        // 2 个换行符 → 3 段，每段以空行结尾
        assert_eq!(section.matches("\n\n").count(), 3);
    }

    #[test]
    fn test_crlf_notes() {
        let info = UpdateInfo::new("1.2.0", Some("one\r\ntwo".into()));
        let message = compose_release_message("Demo", &info);
        assert_eq!(notes_section(&message), "one\n\ntwo\n\n");
    }

    #[test]
    fn test_trailing_newline_keeps_block_count() {
        let blocks: Vec<&str> = split_release_notes("a\nb\n").collect();
        assert_eq!(blocks, vec!["a", "b", ""]);
    }

    #[test]
    fn test_install_prompt_labels_and_title() {
        let identity = AppIdentity::new("Demo", "1.0.0");
        let prompt = build_install_prompt(&identity, &UpdateInfo::new("1.2.0", None));
        assert_eq!(prompt.title, "A new version of Demo has been downloaded");
        assert_eq!(prompt.install_label, "Install and Relaunch");
        assert_eq!(prompt.later_label, "Later");
        assert!(prompt.message.starts_with("Demo 1.2.0 is now available."));
    }
}
