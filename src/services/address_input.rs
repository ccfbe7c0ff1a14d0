// Address-bar input handling.
// Decides whether typed text is a web address or a search term. Purely local
// string work: nothing here touches the network.

use url::Url;

use crate::types::settings::SearchEngine;

/// Returns a navigable URL when `input` looks like a web address.
///
/// Input is treated as an address when, once trimmed, it is non-empty,
/// contains no spaces and contains a dot. Anything without an explicit
/// `http://` or `https://` scheme gets `https://` prepended.
pub fn looks_like_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.contains(char::is_whitespace) || !trimmed.contains('.') {
        return None;
    }

    let lower = trimmed.to_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    let parsed = Url::parse(&candidate).ok()?;
    parsed.host_str()?;
    Some(candidate)
}

/// Resolves address-bar input to the URL to load: the address itself, or a
/// search for the text. Blank input resolves to nothing.
pub fn resolve(input: &str, engine: SearchEngine) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(looks_like_url(trimmed).unwrap_or_else(|| engine.query_url(trimmed)))
}
