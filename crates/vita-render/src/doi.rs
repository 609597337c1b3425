//! DOI extraction from publication records.

use std::sync::LazyLock;

use regex::Regex;

static DOI_ORG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)doi\.org/").unwrap());

static DOI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)10\.\d{4,9}/[-._;()/:A-Z0-9]+").unwrap());

/// Extract a DOI for metric-badge embedding.
///
/// An explicit `doi` field wins. Otherwise the URL is scanned for a
/// `doi.org/` path segment (query string and fragment stripped), then for
/// a bare DOI pattern anywhere in the URL. Returns `None` when nothing
/// applies.
#[must_use]
pub fn extract_doi(explicit: Option<&str>, url: Option<&str>) -> Option<String> {
    if let Some(doi) = explicit
        && !doi.is_empty()
    {
        return Some(doi.to_owned());
    }

    let url = url?;
    if let Some(m) = DOI_ORG_RE.find(url) {
        let tail = &url[m.end()..];
        let tail = match tail.find(['#', '?']) {
            Some(ix) => &tail[..ix],
            None => tail,
        };
        if !tail.is_empty() {
            return Some(tail.to_owned());
        }
        return None;
    }

    DOI_RE.find(url).map(|m| m.as_str().to_owned())
}
