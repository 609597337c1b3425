//! Education entry splitting.
//!
//! An education line like `"PhD in Geography, University of Cambridge,
//! 2021 - 2024"` is split into a year component (a single year or a range
//! that may end in "Present") and the remaining text, with the separators
//! left dangling by the removal cleaned up.

use std::sync::LazyLock;

use regex::Regex;

static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{4}(?:\s*[-–—]\s*(?:Present|\d{4}))?)\b").unwrap()
});

static WS_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static COMMA_DOT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*·").unwrap());
static TRAILING_COMMA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*$").unwrap());
static MULTI_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());
static DOUBLE_COMMA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*,").unwrap());
static LEADING_DOT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^·\s*").unwrap());
static TRAILING_DOT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*·\s*$").unwrap());

/// Result of splitting an education entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EducationSplit {
    /// Year or year range, whitespace-normalized. `None` when the entry
    /// carries no recognizable year.
    pub years: Option<String>,
    /// Entry text with the year component removed and punctuation cleaned.
    pub text: String,
}

/// Split an education entry into years and text.
#[must_use]
pub fn split_education_entry(entry: &str) -> EducationSplit {
    let Some(m) = YEARS_RE.find(entry) else {
        return EducationSplit {
            years: None,
            text: entry.trim().to_owned(),
        };
    };

    let years = WS_RUN_RE.replace_all(m.as_str(), " ").trim().to_owned();
    let rest = format!("{}{}", &entry[..m.start()], &entry[m.end()..]);

    // Clean up punctuation left dangling where the years were removed.
    let rest = COMMA_DOT_RE.replace_all(&rest, " ·");
    let rest = TRAILING_COMMA_RE.replace_all(&rest, "");
    let rest = MULTI_SPACE_RE.replace_all(&rest, " ");
    let rest = DOUBLE_COMMA_RE.replace_all(&rest, ", ");
    let rest = TRAILING_COMMA_RE.replace_all(&rest, "");
    let rest = rest.trim();
    let rest = LEADING_DOT_RE.replace_all(rest, "");
    let rest = TRAILING_DOT_RE.replace_all(&rest, "");

    EducationSplit {
        years: Some(years),
        text: rest.into_owned(),
    }
}
