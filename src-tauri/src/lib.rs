pub mod bridge;
mod dialogs;
mod error;
mod keepalive;
pub mod navigation;
pub mod notification;
pub mod settings;

use std::sync::Arc;

use tauri::menu::{CheckMenuItemBuilder, MenuBuilder, MenuItemBuilder};
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
use tauri::{Manager, WebviewUrl, WebviewWindowBuilder};
use tauri_plugin_shell::ShellExt;

use keepalive::KeepAlive;
use navigation::NavigationPolicy;
use notification::SystemNotifier;
use settings::SettingsState;

/// The one page this shell exists to host.
const TEAMS_URL: &str = "https://teams.microsoft.com";

/// Desktop Safari user agent — keeps Teams from steering the embedded view
/// toward its mobile app.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_5) AppleWebKit/605.1.15 \
(KHTML, like Gecko) Version/17.0 Safari/605.1.15";

/// Show the main window and switch to Regular activation policy (dock icon visible).
#[cfg(target_os = "macos")]
fn show_window(app: &tauri::AppHandle) {
    let _ = app.set_activation_policy(tauri::ActivationPolicy::Regular);
    if let Some(w) = app.get_webview_window("main") {
        let _ = w.show();
        let _ = w.unminimize();
        let _ = w.set_focus();
    }
}

/// Hide the main window and switch to Accessory activation policy (no dock icon).
#[cfg(target_os = "macos")]
fn hide_window(app: &tauri::AppHandle) {
    if let Some(w) = app.get_webview_window("main") {
        let _ = w.hide();
    }
    let _ = app.set_activation_policy(tauri::ActivationPolicy::Accessory);
}

#[cfg(not(target_os = "macos"))]
fn show_window(app: &tauri::AppHandle) {
    if let Some(w) = app.get_webview_window("main") {
        let _ = w.show();
        let _ = w.unminimize();
        let _ = w.set_focus();
    }
}

#[cfg(not(target_os = "macos"))]
fn hide_window(app: &tauri::AppHandle) {
    if let Some(w) = app.get_webview_window("main") {
        let _ = w.hide();
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let app = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            // Another instance tried to launch — bring the existing window to front
            if let Some(window) = app.get_webview_window("main") {
                let _ = window.unminimize();
                let _ = window.show();
                let _ = window.set_focus();
            }
        }))
        .plugin(tauri_plugin_shell::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            // Request/claim notification identity before anything can fire one
            notification::init();

            let config_dir = app.path().app_config_dir()?;
            std::fs::create_dir_all(&config_dir).ok();
            let settings = SettingsState::load(&config_dir);
            app.manage(settings.clone());

            let (sender, router) = bridge::create(Arc::new(SystemNotifier), settings.clone());
            app.manage(sender);
            tauri::async_runtime::spawn(router);

            let keep_alive = Arc::new(KeepAlive::new());
            app.manage(keep_alive);

            let handle = app.handle().clone();
            let url: tauri::Url = TEAMS_URL.parse()?;
            WebviewWindowBuilder::new(app, "main", WebviewUrl::External(url))
                .title("Teams")
                .inner_size(1280.0, 800.0)
                .user_agent(USER_AGENT)
                .initialization_script(bridge::INIT_SCRIPT)
                .on_navigation(move |url| match navigation::classify(url) {
                    NavigationPolicy::Allow => true,
                    NavigationPolicy::Block => {
                        log::info!("[navigation] blocked {} navigation", url.scheme());
                        false
                    }
                    NavigationPolicy::OpenExternal => {
                        if let Err(e) = handle.shell().open(url.as_str(), None) {
                            log::warn!("[navigation] failed to open external URL: {e}");
                        }
                        false
                    }
                })
                .build()?;

            // Tray keeps the shell reachable while the window is hidden
            let show = MenuItemBuilder::with_id("show", "Show Teams").build(app)?;
            let mute = CheckMenuItemBuilder::with_id("mute", "Mute notifications")
                .checked(!settings.notifications_enabled())
                .build(app)?;
            let quit = MenuItemBuilder::with_id("quit", "Quit").build(app)?;
            let tray_menu = MenuBuilder::new(app).items(&[&show, &mute, &quit]).build()?;

            let mut tray = TrayIconBuilder::new()
                .tooltip("Teams")
                .menu(&tray_menu)
                .on_menu_event(|app, event| match event.id().as_ref() {
                    "show" => show_window(app),
                    "mute" => {
                        let settings = app.state::<SettingsState>();
                        let enabled = settings.notifications_enabled();
                        settings.set_notifications_enabled(!enabled);
                        log::info!(
                            "[settings] notifications {}",
                            if enabled { "muted" } else { "unmuted" }
                        );
                    }
                    "quit" => app.exit(0),
                    _ => {}
                })
                .on_tray_icon_event(|tray, event| {
                    if let TrayIconEvent::Click {
                        button: MouseButton::Left,
                        button_state: MouseButtonState::Up,
                        ..
                    } = event
                    {
                        show_window(tray.app_handle());
                    }
                });
            if let Some(icon) = app.default_window_icon().cloned() {
                tray = tray.icon(icon).icon_as_template(true);
            }
            tray.build(app)?;

            Ok(())
        })
        .on_window_event(|window, event| {
            if window.label() != "main" {
                return;
            }
            match event {
                // Hide instead of quitting — the page keeps running in the tray
                tauri::WindowEvent::CloseRequested { api, .. } => {
                    api.prevent_close();
                    hide_window(window.app_handle());
                }
                // Focus transitions drive the keep-alive audio loop
                tauri::WindowEvent::Focused(focused) => {
                    let app = window.app_handle();
                    if let Some(webview) = app.get_webview_window("main") {
                        let keep_alive = app.state::<Arc<KeepAlive>>();
                        if *focused {
                            keep_alive.enter_foreground(&webview);
                        } else {
                            keep_alive.enter_background(&webview);
                        }
                    }
                }
                _ => {}
            }
        })
        .invoke_handler(tauri::generate_handler![
            bridge::bridge_post,
            dialogs::page_alert,
            dialogs::page_confirm,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|_app_handle: &tauri::AppHandle, _event: tauri::RunEvent| {
        // macOS dock icon click — re-show the hidden window
        #[cfg(target_os = "macos")]
        if let tauri::RunEvent::Reopen {
            has_visible_windows, ..
        } = _event
        {
            if !has_visible_windows {
                show_window(_app_handle);
            }
        }
    });
}
