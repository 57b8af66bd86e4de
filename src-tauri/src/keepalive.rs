//! Background keep-alive for the embedded page.
//!
//! The injected script installs a near-silent WebAudio oscillator; resuming
//! its context while the window is backgrounded keeps the page's timers and
//! title observer running, suspending it on foreground stops the audio.
//! One instance per process, driven from the window focus transitions.

use std::sync::atomic::{AtomicBool, Ordering};

use tauri::WebviewWindow;

use crate::error::ShellResult;

const RESUME_JS: &str =
    "window.__teamsShell && window.__teamsShell.keepAlive && window.__teamsShell.keepAlive.resume();";
const SUSPEND_JS: &str =
    "window.__teamsShell && window.__teamsShell.keepAlive && window.__teamsShell.keepAlive.suspend();";

#[derive(Default)]
pub struct KeepAlive {
    active: AtomicBool,
}

impl KeepAlive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window lost focus: start the silent audio loop. Idempotent.
    pub fn enter_background(&self, window: &WebviewWindow) {
        if self.active.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = eval(window, RESUME_JS) {
            log::warn!("[keepalive] failed to start background audio: {e}");
        }
    }

    /// Window regained focus: stop it. Idempotent.
    pub fn enter_foreground(&self, window: &WebviewWindow) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = eval(window, SUSPEND_JS) {
            log::warn!("[keepalive] failed to stop background audio: {e}");
        }
    }
}

fn eval(window: &WebviewWindow, js: &str) -> ShellResult<()> {
    window.eval(js)?;
    Ok(())
}
