//! File-key extraction from Figma links.
//!
//! Accepted forms:
//! - `https://www.figma.com/{file|design|proto|board}/<KEY>/<slug>?...`
//! - `https://www.figma.com/design/<KEY>/branch/<BRANCH_KEY>/...` (branch key wins)
//! - a bare key of at least 22 alphanumeric characters

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{FigsonaError, FileKey, Result};

static KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("valid file key regex"));

static BARE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{22,}$").expect("valid bare key regex"));

const FILE_ROUTES: &[&str] = &["file", "design", "proto", "board"];

/// Extract the file key from a Figma URL or a bare key.
pub fn extract_file_key(target: &str) -> Result<FileKey> {
    let target = target.trim();
    if BARE_KEY.is_match(target) {
        return Ok(FileKey::new(target));
    }

    let url = parse_figma_url(target).ok_or_else(|| invalid(target))?;
    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [route, key, "branch", branch, ..] if is_file_route(route) && is_key(key) && is_key(branch) => {
            Ok(FileKey::new(*branch))
        }
        [route, key, ..] if is_file_route(route) && is_key(key) => Ok(FileKey::new(*key)),
        _ => Err(invalid(target)),
    }
}

/// Parse a URL on a figma.com host, tolerating a missing scheme.
fn parse_figma_url(target: &str) -> Option<::url::Url> {
    let url = ::url::Url::parse(target)
        .or_else(|_| ::url::Url::parse(&format!("https://{}", target)))
        .ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?;
    (host == "figma.com" || host.ends_with(".figma.com")).then_some(url)
}

fn is_file_route(segment: &str) -> bool {
    FILE_ROUTES.contains(&segment)
}

fn is_key(segment: &str) -> bool {
    KEY.is_match(segment)
}

fn invalid(target: &str) -> FigsonaError {
    FigsonaError::InvalidTarget(target.to_string())
}
