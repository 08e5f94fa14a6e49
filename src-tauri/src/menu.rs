//! # 应用菜单
//!
//! macOS 上构建以应用名命名的子菜单（"About <应用名>" 和 "Quit"，快捷键 Command+Q）；
//! 其他平台使用空的应用菜单。

use tauri::menu::{Menu, MenuEvent};
use tauri::{AppHandle, Runtime};

use crate::models::update::AppIdentity;

/// "Quit" 菜单项 ID
pub const QUIT_MENU_ID: &str = "quit";

/// 构建应用菜单
#[cfg_attr(not(target_os = "macos"), allow(unused_variables))]
pub fn build_app_menu<R: Runtime>(app: &AppHandle<R>, identity: &AppIdentity) -> tauri::Result<Menu<R>> {
    let menu = Menu::new(app)?;

    #[cfg(target_os = "macos")]
    {
        use tauri::menu::{AboutMetadata, MenuItem, PredefinedMenuItem, Submenu};

        let about = PredefinedMenuItem::about(
            app,
            Some(&format!("About {}", identity.name)),
            Some(AboutMetadata {
                name: Some(identity.name.clone()),
                version: Some(identity.version.clone()),
                ..Default::default()
            }),
        )?;
        let quit = MenuItem::with_id(app, QUIT_MENU_ID, "Quit", true, Some("Command+Q"))?;
        let submenu = Submenu::with_items(app, &identity.name, true, &[&about, &quit])?;
        menu.append(&submenu)?;
    }

    Ok(menu)
}

/// 处理菜单事件
pub fn handle_menu_event<R: Runtime>(app: &AppHandle<R>, event: MenuEvent) {
    if event.id().as_ref() == QUIT_MENU_ID {
        log::info!("通过菜单退出应用");
        app.exit(0);
    }
}
