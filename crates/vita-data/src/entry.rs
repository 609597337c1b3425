//! Timeline entry types.

use serde::Deserialize;

/// One renderable timeline item (award, talk, teaching stint).
///
/// Accepts either a bare string or an object carrying time labels and a
/// body. A bare string is an untimed entry whose body is the string
/// itself.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TimelineEntry {
    /// Object shape with optional time labels.
    Timed(TimedEntry),
    /// Bare string, no time labels.
    Plain(String),
}

/// Object shape of a timeline entry.
///
/// `times` takes precedence over the singular `time`; both may be absent,
/// which files the entry under the empty label.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TimedEntry {
    /// Time labels this entry appears under. An entry with several labels
    /// is rendered once per label.
    #[serde(default)]
    pub times: Vec<String>,
    /// Singular alternative to `times`, used when `times` is empty.
    #[serde(default)]
    pub time: Option<String>,
    /// Rendered body. May contain markup.
    #[serde(default)]
    pub text: String,
}

impl TimelineEntry {
    /// Time labels of this entry, in declaration order.
    ///
    /// Plain entries and timed entries without labels return an empty
    /// slice-like vector.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Plain(_) => Vec::new(),
            Self::Timed(entry) => {
                if entry.times.is_empty() {
                    entry.time.as_deref().into_iter().collect()
                } else {
                    entry.times.iter().map(String::as_str).collect()
                }
            }
        }
    }

    /// The rendered body of this entry.
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Timed(entry) => &entry.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(json: &str) -> TimelineEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_plain_entry() {
        let entry = parse(r#""Best poster award""#);
        assert_eq!(entry.body(), "Best poster award");
        assert!(entry.labels().is_empty());
    }

    #[test]
    fn test_timed_entry_with_times() {
        let entry = parse(r#"{"times": ["2020", "2021"], "text": "Lecture series"}"#);
        assert_eq!(entry.labels(), vec!["2020", "2021"]);
        assert_eq!(entry.body(), "Lecture series");
    }

    #[test]
    fn test_timed_entry_with_singular_time() {
        let entry = parse(r#"{"time": "2019", "text": "Invited talk"}"#);
        assert_eq!(entry.labels(), vec!["2019"]);
    }

    #[test]
    fn test_times_takes_precedence_over_time() {
        let entry = parse(r#"{"times": ["2022"], "time": "2018", "text": "X"}"#);
        assert_eq!(entry.labels(), vec!["2022"]);
    }

    #[test]
    fn test_timed_entry_without_labels() {
        let entry = parse(r#"{"text": "Ongoing duty"}"#);
        assert!(entry.labels().is_empty());
        assert_eq!(entry.body(), "Ongoing duty");
    }
}
