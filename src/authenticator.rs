// CSRF token scraping. Plone renders the token as a hidden form field on
// every protected form, so the control panel page is enough to find it.

use regex::Regex;
use std::sync::OnceLock;

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"name="_authenticator"\s+value="([^"]+)""#).expect("authenticator pattern is valid")
    })
}

/// Value of the first `_authenticator` hidden input in `body`, or an empty
/// string when the page carries none.
pub fn extract(body: &str) -> String {
    pattern()
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
