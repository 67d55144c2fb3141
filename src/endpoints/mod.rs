//! The backend's endpoints, one thin wrapper per call.

pub mod analytics;
pub mod auth;
pub mod content;
pub mod users;

pub use auth::{linkedin_connect_url, login, logout, me, register};

use serde_derive::Serialize;

/// The body used by every endpoint that acts on a single piece of content.
#[derive(Debug, Copy, Clone, Serialize)]
struct ContentId<'a> {
    content_id: &'a str,
}

/// Percent-encode a value so it can be used as a single path segment.
fn path_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segments_are_escaped() {
        assert_eq!(path_segment("abc-123"), "abc-123");
        assert_eq!(path_segment("a/b c?"), "a%2Fb%20c%3F");
    }
}
