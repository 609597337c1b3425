//! Named region replacement.
//!
//! Regions are delimited by exact comment markers, `<!-- vita:ID -->` and
//! `<!-- /vita:ID -->`. Replacement swaps the content between a pair
//! wholesale and keeps the markers, so populating an already-populated
//! page with the same data reproduces it byte for byte.

/// Opening marker for a region id.
fn start_marker(id: &str) -> String {
    format!("<!-- vita:{id} -->")
}

/// Closing marker for a region id.
fn end_marker(id: &str) -> String {
    format!("<!-- /vita:{id} -->")
}

/// Whether the page contains a well-formed marker pair for `id`.
#[must_use]
pub fn has_region(page: &str, id: &str) -> bool {
    let start = start_marker(id);
    let end = end_marker(id);
    match page.find(&start) {
        Some(ix) => page[ix + start.len()..].contains(&end),
        None => false,
    }
}

/// Replace the content of region `id` with `content`.
///
/// Returns `true` when the region was found and replaced. A missing or
/// unbalanced marker pair leaves the page untouched and returns `false`;
/// callers treat that as "section not present on this page".
pub fn replace_region(page: &mut String, id: &str, content: &str) -> bool {
    let start = start_marker(id);
    let end = end_marker(id);

    let Some(start_ix) = page.find(&start) else {
        return false;
    };
    let content_start = start_ix + start.len();
    let Some(end_offset) = page[content_start..].find(&end) else {
        return false;
    };
    let content_end = content_start + end_offset;

    page.replace_range(content_start..content_end, content);
    true
}
