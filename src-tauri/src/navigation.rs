//! Navigation policy for the embedded web client.

use url::Url;

/// What to do with a navigation the page requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPolicy {
    /// Load inside the embedded webview.
    Allow,
    /// Cancel outright.
    Block,
    /// Cancel in the webview and hand the URL to the OS.
    OpenExternal,
}

/// HTTP(S) stays in the webview. The web client periodically tries to bounce
/// into the native app via its `msteams` scheme; those navigations go
/// nowhere. Anything else (mailto, tel, ...) belongs to the OS.
pub fn classify(url: &Url) -> NavigationPolicy {
    let scheme = url.scheme().to_ascii_lowercase();
    if scheme.starts_with("http") {
        return NavigationPolicy::Allow;
    }
    if scheme.contains("msteams") {
        return NavigationPolicy::Block;
    }
    NavigationPolicy::OpenExternal
}
