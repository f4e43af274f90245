//! Media URL normalization.
//!
//! The server stores uploads as relative paths (`/uploads/a.jpg`) and serves
//! them from a media host that is configured separately from the API prefix.
//! Records are normalized once per response before they reach a slice; the
//! absolute form is never sent back.

use std::sync::LazyLock;

use regex::Regex;

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
        .expect("static YouTube pattern compiles")
});

pub fn is_absolute(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Join `path` onto `base`, leaving absolute URLs and empty input alone.
///
/// Idempotent: feeding the output back in returns it unchanged. A path that
/// already begins with `base` followed by `/` counts as resolved and is
/// returned as is. For an absolute base such inputs are absolute URLs
/// anyway; for a relative base (`/uploads`) this is what keeps a second pass
/// from producing `/uploads/uploads/...`, so `/uploads/a.jpg` is not
/// prefixed again.
pub fn resolve_media_url(base: &str, path: Option<&str>) -> String {
    let path = match path {
        Some(path) if !path.is_empty() => path,
        _ => return String::new(),
    };
    if is_absolute(path) {
        return path.to_string();
    }

    let base = base.trim_end_matches('/');
    if !base.is_empty() && path.starts_with(base) && path[base.len()..].starts_with('/') {
        return path.to_string();
    }
    format!("{base}/{}", path.trim_start_matches('/'))
}

/// Resolves media paths against a fixed media host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResolver {
    base_url: String,
}

impl MediaResolver {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resolve(&self, path: Option<&str>) -> String {
        resolve_media_url(&self.base_url, path)
    }

    /// Normalizes an optional media field in place. Absent or empty paths
    /// stay `None`.
    pub fn normalize(&self, field: &mut Option<String>) {
        let resolved = self.resolve(field.as_deref());
        *field = if resolved.is_empty() { None } else { Some(resolved) };
    }

    /// Inverse of `resolve` for URLs on this media host, so values read
    /// from state can be written back in their stored form. Foreign URLs
    /// are returned unchanged.
    pub fn to_stored(&self, url: &str) -> String {
        match url.strip_prefix(self.base_url.as_str()) {
            Some(rest) if !self.base_url.is_empty() && rest.starts_with('/') => rest.to_string(),
            _ => url.to_string(),
        }
    }
}

/// Extracts the 11-character video id from watch, short, embed and `v/` links.
pub fn youtube_id(url: &str) -> Option<&str> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn youtube_thumbnail(url: &str) -> Option<String> {
    youtube_id(url).map(|id| format!("https://img.youtube.com/vi/{id}/hqdefault.jpg"))
}

pub fn youtube_embed_url(url: &str) -> Option<String> {
    youtube_id(url).map(|id| format!("https://www.youtube.com/embed/{id}"))
}
