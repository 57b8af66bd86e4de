//! Native dialog presentation for page-originated alert/confirm calls.
//!
//! The injected script replaces `window.alert` and `window.confirm` with
//! invocations of these commands. Both run as async commands so the blocking
//! native dialog never sits on the main invoke path.

use tauri::AppHandle;
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons};

#[tauri::command]
pub async fn page_alert(app: AppHandle, message: String) {
    app.dialog().message(message).title("Teams").blocking_show();
}

#[tauri::command]
pub async fn page_confirm(app: AppHandle, message: String) -> bool {
    app.dialog()
        .message(message)
        .title("Teams")
        .buttons(MessageDialogButtons::OkCancel)
        .blocking_show()
}
