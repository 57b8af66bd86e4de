//! Cross-platform native OS notifications via notify-rust.
//!
//! - macOS: NSUserNotificationCenter (via mac-notification-sys)
//! - Windows: WinRT toast notifications
//! - Linux: freedesktop D-Bus notifications

use uuid::Uuid;

/// Used when the page gives no notification title.
pub const FALLBACK_TITLE: &str = "Teams";
/// Used when the page gives an empty body. A blank notification is worse
/// than a generic one.
pub const FALLBACK_BODY: &str = "Activity in Teams";

/// Set the application identity for notifications. Call once at app startup.
pub fn init() {
    #[cfg(target_os = "macos")]
    {
        // Tell mac-notification-sys to send notifications as our bundle ID
        // so they appear under "Teams Shell" in Notification Center.
        let bundle_id = "com.teams-shell.desktop";
        if let Err(e) = notify_rust::set_application(bundle_id) {
            log::warn!("[notification] failed to set application identity: {e}");
        }
    }
}

/// One fire-and-forget submission to the OS notification surface. The body
/// is never empty; `id` is fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub id: String,
}

impl NotificationRequest {
    pub fn new(title: &str, body: &str) -> Self {
        Self {
            title: if title.is_empty() { FALLBACK_TITLE } else { title }.to_string(),
            body: if body.is_empty() { FALLBACK_BODY } else { body }.to_string(),
            id: Uuid::new_v4().to_string(),
        }
    }
}

/// Where notification requests end up. The production impl talks to the OS;
/// tests substitute a recording sink.
pub trait NotificationSink: Send + Sync + 'static {
    fn deliver(&self, req: &NotificationRequest);
}

/// Delivers through notify-rust with the default system sound. Failures are
/// logged and swallowed — a missed notification must never surface as an
/// error anywhere near page script.
pub struct SystemNotifier;

impl NotificationSink for SystemNotifier {
    fn deliver(&self, req: &NotificationRequest) {
        let result = notify_rust::Notification::new()
            .summary(&req.title)
            .body(&req.body)
            .sound_name("default")
            .show();
        if let Err(e) = result {
            log::warn!("[notification] delivery failed for {}: {e}", req.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_gets_fallback() {
        let req = NotificationRequest::new("Alice", "");
        assert_eq!(req.title, "Alice");
        assert_eq!(req.body, FALLBACK_BODY);
    }

    #[test]
    fn empty_title_gets_fallback() {
        let req = NotificationRequest::new("", "(1) New chat");
        assert_eq!(req.title, FALLBACK_TITLE);
        assert_eq!(req.body, "(1) New chat");
    }

    #[test]
    fn ids_are_unique_per_request() {
        let a = NotificationRequest::new("a", "b");
        let b = NotificationRequest::new("a", "b");
        assert_ne!(a.id, b.id);
    }
}
