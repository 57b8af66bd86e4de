//! Title rule: does a raw document title signal new user-facing activity?
//!
//! The Teams web client prefixes the tab title with an unread count
//! ("(3) | Chat | Microsoft Teams") and swaps in keyword phrases for
//! incoming calls and meetings. Matching on the title alone covers the
//! cases where the page never calls the Notification API.

use std::sync::OnceLock;

use regex::Regex;

/// Keyword substrings matched against the lower-cased title. English and
/// Spanish, the locales the wrapped client is used in.
const ACTIVITY_KEYWORDS: &[&str] = &[
    "new message",
    "mensaje nuevo",
    "call",
    "llamada",
    "meeting",
    "reunión",
];

/// Leading unread-count marker: optional whitespace, then `(` and at least
/// one digit at the very start. "(3) Teams" matches; "Teams (3)" does not.
fn unread_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*\(\d+").unwrap())
}

/// Stateless: every matching title mutation re-triggers, including titles
/// that merely stay in a matching state between mutations.
pub fn signals_activity(title: &str) -> bool {
    if unread_marker().is_match(title) {
        return true;
    }
    let lowered = title.to_lowercase();
    ACTIVITY_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_unread_count_matches() {
        assert!(signals_activity("(3) Teams"));
        assert!(signals_activity("(1) New chat"));
        assert!(signals_activity("  (12) | Chat | Microsoft Teams"));
        // Suffix content is irrelevant once the marker is present
        assert!(signals_activity("(7"));
    }

    #[test]
    fn trailing_count_does_not_match() {
        assert!(!signals_activity("Teams (3)"));
    }

    #[test]
    fn keywords_match_case_insensitively() {
        assert!(signals_activity("New Message from Bob"));
        assert!(signals_activity("Incoming CALL"));
        assert!(signals_activity("Mensaje Nuevo"));
        assert!(signals_activity("Llamada entrante"));
        assert!(signals_activity("Meeting started"));
        assert!(signals_activity("Reunión en curso"));
    }

    #[test]
    fn quiet_titles_do_not_match() {
        assert!(!signals_activity(""));
        assert!(!signals_activity("Random Title"));
        assert!(!signals_activity("Microsoft Teams"));
    }
}
