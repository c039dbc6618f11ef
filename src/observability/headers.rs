//! Which request headers end up in verbose request records.
//!
//! # Design Decisions
//! - `referer` and `user-agent` are never listed: verbose records already
//!   carry them as top-level fields
//! - Credentials are listed by name only, with the value replaced

use axum::http::HeaderMap;

use crate::observability::record::HeaderAttribute;

/// Headers left out of the header group.
pub const IGNORED_HEADERS: &[&str] = &["referer", "user-agent"];

/// Headers whose values are replaced by [`REDACTED`].
pub const REDACTED_HEADERS: &[&str] = &["authorization"];

/// Placeholder for redacted header values.
pub const REDACTED: &str = "[REDACTED]";

pub fn is_ignored(name: &str) -> bool {
    IGNORED_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name))
}

pub fn is_redacted(name: &str) -> bool {
    REDACTED_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// Turn request headers into the attributes of a verbose record.
///
/// Returns nothing unless `debug` is set. Multi-valued headers are joined
/// with `,`; order follows the header map.
pub fn classify_headers(headers: &HeaderMap, debug: bool) -> Vec<HeaderAttribute> {
    if !debug {
        return Vec::new();
    }

    headers
        .keys()
        .filter(|name| !is_ignored(name.as_str()))
        .map(|name| {
            let value = if is_redacted(name.as_str()) {
                REDACTED.to_string()
            } else {
                headers
                    .get_all(name)
                    .iter()
                    .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                    .collect::<Vec<_>>()
                    .join(",")
            };
            HeaderAttribute::new(name.as_str(), value)
        })
        .collect()
}
