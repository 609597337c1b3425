//! Publication citation formatting.
//!
//! Turns one publication record into a render unit: an optional time
//! label for the timeline plus the citation HTML (title, authors, venue
//! details, action links, metric badge placeholders).
//!
//! Free-text citations are segmented with a best-effort regex in the
//! common "authors (year). title. venue" shape. The heuristic is
//! deliberately isolated in [`parse_citation`]: anything it cannot
//! segment renders as a single unsegmented line, never dropped.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use vita_data::Publication;

use crate::author::AuthorEmphasis;
use crate::doi::extract_doi;
use crate::escape::escape_html;
use crate::press::PressTable;

static IN_PREP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)in\s*preparation").unwrap());

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(20\d{2}|19\d{2})\b").unwrap());

// Title runs to the first period followed by whitespace (or end of
// string); an unanchored optional period would let the title capture
// collapse to a single character.
static CITATION_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\((\d{4})\)\.\s+(.+?)(?:\.(?:\s+|$)|$)\s*(.*)$").unwrap()
});

static FOUR_DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());

static VENUE_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+?)\s+(\d.*)$").unwrap());

/// Label used for publications still in preparation. Sorts above every
/// numeric year in the timeline.
pub const IN_PREPARATION: &str = "In preparation";

/// Segmented fields of a free-text citation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CitationParts {
    /// Author list as written.
    pub authors: String,
    /// Four-digit year.
    pub year: String,
    /// Paper title.
    pub title: String,
    /// Remainder: journal, volume, pages.
    pub rest: String,
}

/// One formatted publication, ready for the timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedItem {
    /// Time label for grouping, when one could be derived.
    pub time_label: Option<String>,
    /// Citation HTML.
    pub html: String,
}

/// Split a free-text citation into authors/year/title/rest.
///
/// Matches the "authors (year). title. rest" shape, with the title ending
/// at the first period-plus-whitespace boundary. Returns `None` when the
/// citation does not fit; callers render the raw text instead.
#[must_use]
pub fn parse_citation(raw: &str) -> Option<CitationParts> {
    let caps = CITATION_SPLIT_RE.captures(raw)?;
    Some(CitationParts {
        authors: caps[1].trim().to_owned(),
        year: caps[2].trim().to_owned(),
        title: caps[3].trim().to_owned(),
        rest: caps[4].trim().to_owned(),
    })
}

/// Split a venue line at the first whitespace-then-digit boundary into
/// (journal, numeric suffix). A venue with no such boundary is all
/// journal.
fn split_venue(venue: &str) -> (String, String) {
    let venue = venue.trim();
    match VENUE_SPLIT_RE.captures(venue) {
        Some(caps) => (caps[1].trim().to_owned(), caps[2].trim().to_owned()),
        None => (venue.to_owned(), String::new()),
    }
}

/// Format one publication record.
///
/// Both record shapes are handled: structured records read their fields
/// directly, free-text citations go through [`parse_citation`]. A
/// structured record without authors/venue/year degrades to the free-text
/// path with its title as the citation body.
#[must_use]
pub fn format_publication(
    publication: &Publication,
    author: &AuthorEmphasis,
    press: &PressTable,
) -> RenderedItem {
    let structured = match publication {
        Publication::Structured(record) if record.has_citation_fields() => Some(record),
        _ => None,
    };

    let citation: &str = match publication {
        Publication::Plain(text) => text,
        Publication::Structured(record) => {
            if structured.is_some() {
                ""
            } else {
                record.title.as_deref().unwrap_or("")
            }
        }
    };

    let url: Option<&str> = match publication {
        Publication::Plain(_) => None,
        Publication::Structured(record) => record.url.as_deref().filter(|u| !u.is_empty()),
    };
    let explicit_doi: Option<&str> = match publication {
        Publication::Plain(_) => None,
        Publication::Structured(record) => record.doi.as_deref(),
    };

    // Year classification: "in preparation" wins over any numeric year.
    let year_source = structured.map_or(citation, |r| r.year.as_deref().unwrap_or(""));
    let in_prep = IN_PREP_RE.is_match(year_source);
    let time_label = if in_prep {
        Some(IN_PREPARATION.to_owned())
    } else {
        YEAR_RE.find(year_source).map(|m| m.as_str().to_owned())
    };

    let parts = match structured {
        Some(record) => CitationParts {
            authors: record.authors.clone().unwrap_or_default(),
            year: record.year.clone().unwrap_or_default(),
            title: record.title.clone().unwrap_or_default(),
            rest: record.venue.clone().unwrap_or_default(),
        },
        None => parse_citation(citation).unwrap_or_default(),
    };

    let title_html = if parts.title.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="pub-title">{}</div>"#,
            escape_html(&parts.title)
        )
    };

    let authors_html = if parts.authors.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="pub-authors">{}</div>"#,
            author.emphasize(&escape_html(&parts.authors))
        )
    };

    // Venue details: italic journal, year in parentheses (only when the
    // year is exactly four digits), then comma + volume/pages.
    let numeric_year = FOUR_DIGITS_RE.is_match(&parts.year);
    let mut details_text = String::new();
    if parts.rest.is_empty() {
        if numeric_year {
            let _ = write!(details_text, "({})", parts.year);
        }
    } else {
        let (journal, suffix) = split_venue(&parts.rest);
        if !journal.is_empty() {
            let _ = write!(
                details_text,
                r#"<em class="pub-journal">{}</em>"#,
                escape_html(&journal)
            );
        }
        if numeric_year {
            let _ = write!(details_text, " ({})", parts.year);
        }
        if !suffix.is_empty() {
            let _ = write!(details_text, ", {}", escape_html(&suffix));
        }
        details_text = details_text.trim().to_owned();
    }

    let doi = extract_doi(explicit_doi, url);
    let metrics_inline = metric_placeholders(doi.as_deref(), url);

    let details_html = if !details_text.is_empty() {
        format!(r#"<div class="pub-meta">{details_text}{metrics_inline}</div>"#)
    } else if !authors_html.is_empty() {
        if metrics_inline.is_empty() {
            String::new()
        } else {
            format!(r#"<div class="pub-meta">{metrics_inline}</div>"#)
        }
    } else {
        // Unsegmented fallback: the whole citation on one line, with the
        // author still emphasized.
        format!(
            r#"<div class="pub-meta">{}{metrics_inline}</div>"#,
            author.emphasize(&escape_html(citation))
        )
    };

    let citation_html = format!("{title_html}{authors_html}{details_html}");

    // "In preparation" entries carry no action links regardless of URL.
    let html = if in_prep {
        citation_html
    } else {
        let title_for_checks = if parts.title.is_empty() {
            citation
        } else {
            &parts.title
        };
        let mut buttons = String::new();
        for link in press.links_for(title_for_checks) {
            let _ = write!(
                buttons,
                r#"<a class="btn btn-outline" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                escape_html(&link.url),
                escape_html(&link.label)
            );
        }
        match url {
            Some(u) => {
                let _ = write!(
                    buttons,
                    r#"<a class="btn btn-solid" href="{}" target="_blank" rel="noopener noreferrer">Full Text</a>"#,
                    escape_html(u)
                );
            }
            None => {
                buttons.push_str(r#"<span class="btn btn-solid" aria-disabled="true">Full Text</span>"#);
            }
        }
        format!(r#"{citation_html}<div class="pub-actions">{buttons}</div>"#)
    };

    RenderedItem { time_label, html }
}

/// Placeholder spans hydrated later with live metric badges.
fn metric_placeholders(doi: Option<&str>, url: Option<&str>) -> String {
    let mut spans = String::new();
    if doi.is_some() || url.is_some() {
        spans.push_str(r#"<span class="altmetric-bar-wrap""#);
        if let Some(doi) = doi {
            let _ = write!(spans, r#" data-doi="{}""#, escape_html(doi));
        }
        if let Some(url) = url {
            let _ = write!(spans, r#" data-url="{}""#, escape_html(url));
        }
        spans.push_str("></span>");
    }
    if let Some(doi) = doi {
        let _ = write!(
            spans,
            r#"<span class="__dimensions_badge_embed__" data-doi="{}" data-style="small_rectangle" data-legend="never"></span>"#,
            escape_html(doi)
        );
    }
    if spans.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="pub-metrics-inline">{spans}</span>"#)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vita_data::StructuredPublication;

    use super::*;

    fn author() -> AuthorEmphasis {
        AuthorEmphasis::new("Chim", &["M".to_owned(), "M".to_owned()]).unwrap()
    }

    fn format(publication: &Publication) -> RenderedItem {
        format_publication(publication, &author(), &PressTable::built_in())
    }

    // parse_citation

    #[test]
    fn test_parse_citation_full_shape() {
        let parts = parse_citation(
            "Smith, J. and Chim, M. M. (2023). A Great Paper. Journal of Things, 12(3), 100-110.",
        )
        .unwrap();
        assert_eq!(parts.authors, "Smith, J. and Chim, M. M.");
        assert_eq!(parts.year, "2023");
        assert_eq!(parts.title, "A Great Paper");
        assert_eq!(parts.rest, "Journal of Things, 12(3), 100-110.");
    }

    #[test]
    fn test_parse_citation_no_trailing_venue() {
        let parts = parse_citation("Chim, M. M. (2020). Short Note.").unwrap();
        assert_eq!(parts.title, "Short Note");
        assert_eq!(parts.rest, "");
    }

    #[test]
    fn test_parse_citation_rejects_unstructured_text() {
        assert_eq!(parse_citation("An unpublished manuscript draft"), None);
        assert_eq!(parse_citation(""), None);
    }

    // format_publication: free-text path

    #[test]
    fn test_plain_citation_extracts_year_and_emphasizes_author() {
        let publication = Publication::Plain(
            "Smith, J. and Chim, M. M. (2023). A Great Paper. Journal of Things, 12(3), 100-110."
                .to_owned(),
        );
        let item = format(&publication);
        assert_eq!(item.time_label.as_deref(), Some("2023"));
        assert!(item.html.contains(r#"<div class="pub-title">A Great Paper</div>"#));
        assert!(
            item.html
                .contains(r#"<strong class="pub-author-me">Chim, M. M</strong>"#)
        );
        assert!(item.html.contains(r#"<em class="pub-journal">Journal of Things,</em>"#));
        assert!(item.html.contains("(2023), 12(3), 100-110."));
    }

    #[test]
    fn test_plain_citation_unsegmentable_renders_raw() {
        let publication = Publication::Plain("Chim, M. M., untitled manuscript".to_owned());
        let item = format(&publication);
        assert_eq!(item.time_label, None);
        assert!(item.html.contains(r#"<div class="pub-meta">"#));
        assert!(
            item.html
                .contains(r#"<strong class="pub-author-me">Chim, M. M</strong>., untitled manuscript"#)
        );
        // No title or authors line, but still a disabled Full Text button.
        assert!(!item.html.contains("pub-title"));
        assert!(item.html.contains(r#"aria-disabled="true""#));
    }

    #[test]
    fn test_plain_citation_in_preparation() {
        let publication =
            Publication::Plain("Chim, M. M. et al. A Future Paper, in preparation.".to_owned());
        let item = format(&publication);
        assert_eq!(item.time_label.as_deref(), Some(IN_PREPARATION));
        assert!(!item.html.contains("pub-actions"));
    }

    // format_publication: structured path

    #[test]
    fn test_structured_record_renders_fields() {
        let publication = Publication::Structured(StructuredPublication {
            authors: Some("Chim, M. M. and Smith, J.".to_owned()),
            year: Some("2023".to_owned()),
            title: Some("A Great Paper".to_owned()),
            venue: Some("Journal of Things, 12(3), 100-110".to_owned()),
            url: Some("https://doi.org/10.1234/abcd.5678".to_owned()),
            doi: None,
        });
        let item = format(&publication);
        assert_eq!(item.time_label.as_deref(), Some("2023"));
        assert!(item.html.contains(r#"<div class="pub-title">A Great Paper</div>"#));
        assert!(item.html.contains(r#"<div class="pub-authors">"#));
        assert!(item.html.contains(r#"data-doi="10.1234/abcd.5678""#));
        assert!(item.html.contains("__dimensions_badge_embed__"));
        assert!(item.html.contains(
            r#"<a class="btn btn-solid" href="https://doi.org/10.1234/abcd.5678" target="_blank" rel="noopener noreferrer">Full Text</a>"#
        ));
    }

    #[test]
    fn test_structured_in_preparation_has_no_action_links() {
        let publication = Publication::Structured(StructuredPublication {
            authors: Some("A. Author".to_owned()),
            year: Some("in preparation".to_owned()),
            title: Some("T".to_owned()),
            venue: Some(String::new()),
            url: Some("https://example.org/preprint".to_owned()),
            doi: None,
        });
        let item = format(&publication);
        assert_eq!(item.time_label.as_deref(), Some("In preparation"));
        assert!(!item.html.contains("pub-actions"));
        assert!(!item.html.contains("btn"));
    }

    #[test]
    fn test_structured_without_venue_shows_year_only() {
        let publication = Publication::Structured(StructuredPublication {
            authors: Some("Chim, M. M.".to_owned()),
            year: Some("2021".to_owned()),
            title: Some("Standalone Report".to_owned()),
            venue: None,
            url: None,
            doi: None,
        });
        let item = format(&publication);
        assert!(item.html.contains(r#"<div class="pub-meta">(2021)</div>"#));
        assert!(item.html.contains(r#"aria-disabled="true""#));
    }

    #[test]
    fn test_structured_title_only_degrades_to_citation_body() {
        let publication = Publication::Structured(StructuredPublication {
            title: Some("Dataset release notes".to_owned()),
            url: Some("https://example.org/data".to_owned()),
            ..StructuredPublication::default()
        });
        let item = format(&publication);
        assert_eq!(item.time_label, None);
        assert!(!item.html.contains("pub-title"));
        assert!(item.html.contains("Dataset release notes"));
        assert!(item.html.contains(r#"href="https://example.org/data""#));
    }

    #[test]
    fn test_non_numeric_year_omits_parentheses() {
        let publication = Publication::Structured(StructuredPublication {
            authors: Some("Chim, M. M.".to_owned()),
            year: Some("2022, accepted".to_owned()),
            title: Some("T".to_owned()),
            venue: Some("Some Journal".to_owned()),
            url: None,
            doi: None,
        });
        let item = format(&publication);
        assert_eq!(item.time_label.as_deref(), Some("2022"));
        assert!(item.html.contains(r#"<em class="pub-journal">Some Journal</em>"#));
        assert!(!item.html.contains("(2022, accepted)"));
        assert!(!item.html.contains("(2022)"));
    }

    // Press links

    #[test]
    fn test_press_links_attached_before_full_text() {
        let publication = Publication::Plain(
            "Chim, M. M. (2023). Climate projections very likely underestimate future volcanic forcing. Geophysical Research Letters, 50, e2023GL103743."
                .to_owned(),
        );
        let item = format(&publication);
        let press_release = item.html.find("Press Release").unwrap();
        let spotlight = item.html.find("Research Spotlight").unwrap();
        let full_text = item.html.find("Full Text").unwrap();
        assert!(press_release < spotlight);
        assert!(spotlight < full_text);
    }

    #[test]
    fn test_idempotent_formatting() {
        let publication = Publication::Plain(
            "Smith, J. and Chim, M. M. (2023). A Great Paper. Journal of Things, 12(3), 100-110."
                .to_owned(),
        );
        assert_eq!(format(&publication), format(&publication));
    }
}
