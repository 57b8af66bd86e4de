//! Page-to-host notification bridge.
//!
//! The script injected into the Teams web client posts raw JSON payloads
//! through the `bridge_post` command. Payloads are validated into
//! [`BridgeMessage`] values and pushed into a bounded channel; a background
//! router drains the channel in FIFO order and decides which messages become
//! native notifications. The write path is non-blocking and lossy: a full
//! channel or malformed payload costs at most a missed notification, never
//! an error in page script.

pub mod heuristic;

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::mpsc;

use crate::notification::{NotificationRequest, NotificationSink};
use crate::settings::SettingsState;

const CHANNEL_CAPACITY: usize = 64;

/// Script injected into the embedded page at document start. Installs the
/// title observer, the Notification wrapper, the dialog overrides, and the
/// keep-alive audio hooks.
pub const INIT_SCRIPT: &str = include_str!("inject.js");

/// Wire format of the injected script's messages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BridgeMessage {
    /// The document title changed; `value` is the current title text.
    Title {
        #[serde(default)]
        value: String,
    },
    /// The page constructed a `Notification`; forwarded verbatim.
    Notification {
        #[serde(default)]
        title: String,
        #[serde(default)]
        body: String,
    },
}

/// Cheaply cloneable handle for posting bridge messages from the webview.
#[derive(Clone)]
pub struct BridgeSender {
    tx: mpsc::Sender<BridgeMessage>,
}

impl BridgeSender {
    /// Parse and enqueue a raw payload from the page. Unknown or malformed
    /// shapes are dropped silently; a full channel drops with a warning.
    pub fn post(&self, raw: serde_json::Value) {
        let msg = match serde_json::from_value::<BridgeMessage>(raw) {
            Ok(msg) => msg,
            Err(e) => {
                log::debug!("[bridge] ignoring unrecognized payload: {e}");
                return;
            }
        };
        if self.tx.try_send(msg).is_err() {
            log::warn!("[bridge] channel full, message dropped");
        }
    }
}

/// Create the bridge channel and the router future.
///
/// The caller is responsible for spawning the future with
/// `tauri::async_runtime::spawn`.
pub fn create(
    sink: Arc<dyn NotificationSink>,
    settings: SettingsState,
) -> (BridgeSender, impl std::future::Future<Output = ()>) {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let sender = BridgeSender { tx };
    let future = run(rx, sink, settings);
    (sender, future)
}

async fn run(
    mut rx: mpsc::Receiver<BridgeMessage>,
    sink: Arc<dyn NotificationSink>,
    settings: SettingsState,
) {
    while let Some(msg) = rx.recv().await {
        if !settings.notifications_enabled() {
            log::debug!("[bridge] notifications muted, message dropped");
            continue;
        }
        route(msg, sink.as_ref());
    }
}

/// Route one validated message. `notification` messages go straight to the
/// sink; `title` messages only when the heuristic fires, with the title text
/// as the notification body.
pub fn route(msg: BridgeMessage, sink: &dyn NotificationSink) {
    match msg {
        BridgeMessage::Notification { title, body } => {
            sink.deliver(&NotificationRequest::new(&title, &body));
        }
        BridgeMessage::Title { value } => {
            if heuristic::signals_activity(&value) {
                sink.deliver(&NotificationRequest::new("", &value));
            }
        }
    }
}

/// Entry point for the injected script. Always succeeds from the page's
/// perspective; everything downstream is fire-and-forget.
#[tauri::command]
pub fn bridge_post(state: tauri::State<'_, BridgeSender>, payload: serde_json::Value) {
    state.post(payload);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::notification::{FALLBACK_BODY, FALLBACK_TITLE};

    #[derive(Default)]
    struct RecordingSink {
        delivered: Mutex<Vec<NotificationRequest>>,
    }

    impl NotificationSink for RecordingSink {
        fn deliver(&self, req: &NotificationRequest) {
            self.delivered.lock().unwrap().push(req.clone());
        }
    }

    fn parse(raw: serde_json::Value) -> BridgeMessage {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn wire_format_round_trips_both_kinds() {
        assert_eq!(
            parse(json!({"type": "title", "value": "(2) Teams"})),
            BridgeMessage::Title {
                value: "(2) Teams".into()
            }
        );
        assert_eq!(
            parse(json!({"type": "notification", "title": "Alice", "body": "hi"})),
            BridgeMessage::Notification {
                title: "Alice".into(),
                body: "hi".into()
            }
        );
    }

    #[test]
    fn absent_fields_default_to_empty() {
        assert_eq!(
            parse(json!({"type": "notification"})),
            BridgeMessage::Notification {
                title: String::new(),
                body: String::new()
            }
        );
    }

    #[test]
    fn unknown_kinds_fail_to_parse() {
        assert!(serde_json::from_value::<BridgeMessage>(json!({"type": "bogus"})).is_err());
        assert!(serde_json::from_value::<BridgeMessage>(json!(42)).is_err());
        assert!(serde_json::from_value::<BridgeMessage>(json!({"value": "no tag"})).is_err());
    }

    #[test]
    fn notification_kind_always_delivers() {
        let sink = RecordingSink::default();
        // Body that the title heuristic would reject — must deliver anyway
        route(
            BridgeMessage::Notification {
                title: "Alice".into(),
                body: "Random Title".into(),
            },
            &sink,
        );
        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].title, "Alice");
        assert_eq!(delivered[0].body, "Random Title");
    }

    #[test]
    fn matching_title_delivers_with_fallback_title() {
        let sink = RecordingSink::default();
        route(
            BridgeMessage::Title {
                value: "(1) New chat".into(),
            },
            &sink,
        );
        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].title, FALLBACK_TITLE);
        assert_eq!(delivered[0].body, "(1) New chat");
    }

    #[test]
    fn quiet_title_delivers_nothing() {
        let sink = RecordingSink::default();
        route(
            BridgeMessage::Title {
                value: "Microsoft Teams".into(),
            },
            &sink,
        );
        assert!(sink.delivered.lock().unwrap().is_empty());
    }

    #[test]
    fn empty_notification_body_gets_fallback() {
        let sink = RecordingSink::default();
        route(
            BridgeMessage::Notification {
                title: "Alice".into(),
                body: String::new(),
            },
            &sink,
        );
        let delivered = sink.delivered.lock().unwrap();
        assert_eq!(delivered[0].body, FALLBACK_BODY);
    }
}
