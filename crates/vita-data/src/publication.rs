//! Publication record types.

use serde::{Deserialize, Deserializer};

/// One publication record.
///
/// The document may carry publications either as free-text citation
/// strings or as structured objects; both shapes are preserved losslessly
/// and the formatter decides how to segment them.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Publication {
    /// Structured record with named fields.
    Structured(StructuredPublication),
    /// Free-text citation.
    Plain(String),
}

/// Structured shape of a publication record.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct StructuredPublication {
    /// Author list as written, e.g. "Chim, M. M. and Smith, J.".
    pub authors: Option<String>,
    /// Publication year, or a phase marker such as "in preparation".
    /// Numeric JSON years are accepted and stringified.
    #[serde(default, deserialize_with = "year_or_number")]
    pub year: Option<String>,
    /// Paper title.
    pub title: Option<String>,
    /// Venue line: journal, volume, pages.
    pub venue: Option<String>,
    /// Full-text URL.
    pub url: Option<String>,
    /// Explicit DOI; preferred over extraction from the URL.
    pub doi: Option<String>,
}

impl StructuredPublication {
    /// Whether the record carries any of the fields that make structured
    /// segmentation meaningful.
    ///
    /// Records with only a title (and perhaps a URL) are treated like
    /// free-text citations, with the title as the citation body.
    #[must_use]
    pub fn has_citation_fields(&self) -> bool {
        self.authors.is_some() || self.venue.is_some() || self.year.is_some()
    }
}

/// Accept a year as either a JSON string or a JSON number.
fn year_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "year must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(json: &str) -> Publication {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_plain_citation() {
        let publication = parse(r#""Chim, M. M. (2023). A Paper. Journal, 1, 1-10.""#);
        assert_eq!(
            publication,
            Publication::Plain("Chim, M. M. (2023). A Paper. Journal, 1, 1-10.".to_owned())
        );
    }

    #[test]
    fn test_structured_record() {
        let publication = parse(
            r#"{
                "authors": "Chim, M. M. and Smith, J.",
                "year": "2023",
                "title": "A Paper",
                "venue": "Journal of Things, 12(3), 100-110",
                "url": "https://doi.org/10.1234/abcd",
                "doi": "10.1234/abcd"
            }"#,
        );
        let Publication::Structured(record) = publication else {
            panic!("expected structured record");
        };
        assert_eq!(record.year.as_deref(), Some("2023"));
        assert_eq!(record.doi.as_deref(), Some("10.1234/abcd"));
        assert!(record.has_citation_fields());
    }

    #[test]
    fn test_numeric_year_stringified() {
        let publication = parse(r#"{"title": "T", "year": 2021}"#);
        let Publication::Structured(record) = publication else {
            panic!("expected structured record");
        };
        assert_eq!(record.year.as_deref(), Some("2021"));
    }

    #[test]
    fn test_title_only_record_lacks_citation_fields() {
        let publication = parse(r#"{"title": "T", "url": "https://example.org"}"#);
        let Publication::Structured(record) = publication else {
            panic!("expected structured record");
        };
        assert!(!record.has_citation_fields());
    }
}
