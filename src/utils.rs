use chrono::Utc;
use rand::{Rng, distr::Alphanumeric};

/// Length of a Spotify base-62 id.
pub const SPOTIFY_ID_LEN: usize = 22;

pub fn generate_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

/// Current time in epoch seconds.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Extracts a playlist id from what a user pastes into `/geturl`.
///
/// Accepts an `open.spotify.com` playlist link (with or without query string
/// or locale prefix), a `spotify:playlist:` URI, or a bare id.
pub fn parse_playlist_id(input: &str) -> Option<String> {
    let input = input.trim();

    let candidate = if let Some(rest) = input.strip_prefix("spotify:playlist:") {
        rest
    } else if let Some((_, rest)) = input.split_once("/playlist/") {
        rest.split(['?', '#', '/']).next().unwrap_or_default()
    } else {
        input
    };

    is_spotify_id(candidate).then(|| candidate.to_string())
}

/// Whether `value` has the shape of a Spotify id.
pub fn is_spotify_id(value: &str) -> bool {
    value.len() == SPOTIFY_ID_LEN && value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Escapes text taken from provider responses before it is placed in HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Only same-site absolute paths are accepted as post-refresh redirect
/// targets.
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}
