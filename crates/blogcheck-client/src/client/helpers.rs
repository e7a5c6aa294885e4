//! Pure helpers: error body parsing and resource naming (no HTTP, no status logic).

use crate::types::ErrorDetail;

/// Extract the `detail` message from an error response body.
///
/// Expected format: `{"detail": "..."}` or `{"detail": [...]}`.
/// Falls back to the raw body (truncated) or the status line.
pub(crate) fn parse_error_detail(body: &str, status_line: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorDetail>(body) {
        return parsed.message();
    }
    if body.trim().is_empty() {
        status_line.to_string()
    } else {
        body.chars().take(200).collect()
    }
}

/// Name the resource a URL addresses, for `NotFound` errors.
///
/// `.../users/alice` => `user alice`, `.../posts/3` => `post 3`,
/// `.../posts/` => `post`.
pub(crate) fn resource_from_url(url: &str) -> String {
    let parsed = match url::Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return "resource".to_string(),
    };
    let segments: Vec<&str> = parsed
        .path_segments()
        .map(|s| s.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let (kind, id) = match segments.as_slice() {
        [] => return "resource".to_string(),
        [.., kind, id] if is_collection(kind) => (*kind, Some(*id)),
        [.., kind] => (*kind, None),
    };

    let singular = kind.strip_suffix('s').unwrap_or(kind);
    match id {
        Some(id) => format!("{} {}", singular, id),
        None => singular.to_string(),
    }
}

fn is_collection(segment: &str) -> bool {
    matches!(segment, "users" | "posts" | "post")
}
