//! String sanitization for URLs and relative paths.

use regex::Regex;
use std::sync::OnceLock;

/// Any character other than ASCII letters, digits and the URL punctuation set.
fn url_unsafe() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"[^A-Za-z0-9$\-_.+!*'(),{}|\\^~\[\]`<>#%";/?:@&=]"#)
            .expect("url-safe character class is a valid regex")
    })
}

/// Strip characters that may not appear in a URL.
pub fn strip_url_unsafe(value: &str) -> String {
    url_unsafe().replace_all(value, "").into_owned()
}

/// Sanitize a URL; `None` when nothing survives.
pub fn sanitize_url(value: &str) -> Option<String> {
    let url = strip_url_unsafe(value);
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}

/// Normalize separators to `/` and strip URL-unsafe characters; `None` when
/// nothing survives.
pub fn sanitize_path(value: &str) -> Option<String> {
    let path = strip_url_unsafe(&value.replace('\\', "/"));
    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}
