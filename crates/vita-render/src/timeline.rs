//! Timeline grouping, sorting, and rendering.
//!
//! Entries carry zero or more time labels (a year, a year range,
//! "Present", "In preparation"). Grouping builds one group per distinct
//! label; an entry with several labels fans out into each of them, and
//! entries without labels collect under the empty label. Labels sort by
//! recency, most recent first, with the special tokens ranked above any
//! numeric year.
//!
//! The grouped form is the regular layout; [`flatten_and_sort`] is the
//! narrow-viewport variant that trades the grouped structure for one flat
//! chronological list.

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;
use vita_data::TimelineEntry;

use crate::escape::escape_html;

static IN_PREP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)in\s*prepar").unwrap());
static PRESENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)present").unwrap());
static YEAR_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{4})\b").unwrap());

/// Sort rank of labels containing "in preparation".
const RANK_IN_PREPARATION: i64 = 10_000;
/// Sort rank of labels containing "present".
const RANK_PRESENT: i64 = 9_999;

/// One timeline group: a label and the bodies filed under it, in
/// insertion order. Derived per render pass, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineGroup {
    /// Time label; empty for untimed entries.
    pub label: String,
    /// Rendered bodies assigned to this label.
    pub bodies: Vec<String>,
}

/// Sort key for a time label, higher sorting first.
///
/// "In preparation" ranks above everything, then "Present", then the
/// greatest four-digit year found in the label. Labels with none of
/// these (the empty label included) rank lowest and keep their relative
/// encounter order.
#[must_use]
pub fn sort_value(label: &str) -> i64 {
    if label.is_empty() {
        return i64::MIN;
    }
    if IN_PREP_RE.is_match(label) {
        return RANK_IN_PREPARATION;
    }
    if PRESENT_RE.is_match(label) {
        return RANK_PRESENT;
    }
    YEAR_TOKEN_RE
        .captures_iter(label)
        .filter_map(|caps| caps[1].parse::<i64>().ok())
        .max()
        .unwrap_or(i64::MIN)
}

/// Group entries by label and sort the groups by recency.
///
/// Bodies keep the order the entries were supplied in; groups with equal
/// sort keys keep the order their labels were first encountered (the
/// sort is stable).
#[must_use]
pub fn group_and_sort(entries: &[TimelineEntry]) -> Vec<TimelineGroup> {
    fn file(
        groups: &mut Vec<TimelineGroup>,
        index_of: &mut HashMap<String, usize>,
        label: &str,
        body: &str,
    ) {
        let idx = *index_of.entry(label.to_owned()).or_insert_with(|| {
            groups.push(TimelineGroup {
                label: label.to_owned(),
                bodies: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].bodies.push(body.to_owned());
    }

    let mut groups: Vec<TimelineGroup> = Vec::new();
    let mut index_of: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let labels = entry.labels();
        if labels.is_empty() {
            file(&mut groups, &mut index_of, "", entry.body());
        } else {
            for label in labels {
                file(&mut groups, &mut index_of, label, entry.body());
            }
        }
    }

    groups.sort_by(|a, b| sort_value(&b.label).cmp(&sort_value(&a.label)));
    groups
}

/// Flatten entries to one (label, body) pair per label instance and sort
/// by recency.
///
/// The narrow-viewport variant: no grouping, so a label shared by several
/// entries appears once per entry.
#[must_use]
pub fn flatten_and_sort(entries: &[TimelineEntry]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for entry in entries {
        let labels = entry.labels();
        if labels.is_empty() {
            pairs.push((String::new(), entry.body().to_owned()));
        } else {
            for label in labels {
                pairs.push((label.to_owned(), entry.body().to_owned()));
            }
        }
    }
    pairs.sort_by(|a, b| sort_value(&b.0).cmp(&sort_value(&a.0)));
    pairs
}

/// Render grouped timeline items.
///
/// Each group becomes one list item with a time marker (omitted for the
/// empty label) and a nested list of bodies. Bodies are markup by
/// contract and pass through unescaped; labels are escaped.
#[must_use]
pub fn render_grouped(groups: &[TimelineGroup]) -> String {
    let mut html = String::new();
    for group in groups {
        let time_html = if group.label.is_empty() {
            String::new()
        } else {
            format!(r#"<span class="time">{}</span>"#, escape_html(&group.label))
        };
        let _ = write!(
            html,
            r#"<li class="group"><div class="time-list">{time_html}</div><div class="item-body"><ul class="item-list">"#
        );
        for body in &group.bodies {
            let _ = write!(html, "<li>{body}</li>");
        }
        html.push_str("</ul></div></li>");
    }
    html
}

/// Render flattened timeline items, one list item per (label, body) pair.
#[must_use]
pub fn render_flat(pairs: &[(String, String)]) -> String {
    let mut html = String::new();
    for (label, body) in pairs {
        let time_html = if label.is_empty() {
            String::new()
        } else {
            format!(r#"<span class="time">{}</span>"#, escape_html(label))
        };
        let _ = write!(
            html,
            r#"<li class="mobile-item">{time_html}<div class="mobile-item-body">{body}</div></li>"#
        );
    }
    html
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vita_data::TimedEntry;

    use super::*;

    fn timed(times: &[&str], text: &str) -> TimelineEntry {
        TimelineEntry::Timed(TimedEntry {
            times: times.iter().map(|t| (*t).to_owned()).collect(),
            time: None,
            text: text.to_owned(),
        })
    }

    fn labels(groups: &[TimelineGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.label.as_str()).collect()
    }

    // sort_value

    #[test]
    fn test_in_preparation_sorts_above_everything() {
        assert!(sort_value("In preparation") > sort_value("Present"));
        assert!(sort_value("In preparation") > sort_value("2099"));
        assert!(sort_value("in preparation") > sort_value("2024"));
    }

    #[test]
    fn test_present_sorts_above_numeric_years() {
        assert!(sort_value("Present") > sort_value("2099"));
        assert!(sort_value("2022 - Present") > sort_value("2023"));
    }

    #[test]
    fn test_year_range_uses_max_year() {
        assert_eq!(sort_value("2019 - 2021"), 2021);
        assert!(sort_value("2019 - 2021") > sort_value("2020"));
    }

    #[test]
    fn test_unrecognized_labels_sort_last() {
        assert_eq!(sort_value("TBD"), i64::MIN);
        assert_eq!(sort_value(""), i64::MIN);
        assert!(sort_value("TBD") < sort_value("1901"));
    }

    // group_and_sort

    #[test]
    fn test_multi_label_entry_fans_out() {
        let entries = vec![timed(&["2020", "2021"], "X")];
        let groups = group_and_sort(&entries);
        assert_eq!(labels(&groups), vec!["2021", "2020"]);
        assert_eq!(groups[0].bodies, vec!["X"]);
        assert_eq!(groups[1].bodies, vec!["X"]);
    }

    #[test]
    fn test_untimed_entries_group_under_empty_label_last() {
        let entries = vec![
            TimelineEntry::Plain("untimed".to_owned()),
            timed(&["2020"], "timed"),
        ];
        let groups = group_and_sort(&entries);
        assert_eq!(labels(&groups), vec!["2020", ""]);
        assert_eq!(groups[1].bodies, vec!["untimed"]);
    }

    #[test]
    fn test_special_tokens_order() {
        let entries = vec![
            timed(&["2023"], "a"),
            timed(&["2021 - Present"], "b"),
            timed(&["In preparation"], "c"),
        ];
        let groups = group_and_sort(&entries);
        assert_eq!(labels(&groups), vec!["In preparation", "2021 - Present", "2023"]);
    }

    #[test]
    fn test_bodies_keep_insertion_order_within_label() {
        let entries = vec![
            timed(&["2020"], "first"),
            timed(&["2021"], "other"),
            timed(&["2020"], "second"),
        ];
        let groups = group_and_sort(&entries);
        let group_2020 = groups.iter().find(|g| g.label == "2020").unwrap();
        assert_eq!(group_2020.bodies, vec!["first", "second"]);
    }

    #[test]
    fn test_equal_keys_keep_encounter_order() {
        let entries = vec![
            timed(&["TBD"], "a"),
            timed(&["forthcoming"], "b"),
            timed(&["2020"], "c"),
        ];
        let groups = group_and_sort(&entries);
        assert_eq!(labels(&groups), vec!["2020", "TBD", "forthcoming"]);
    }

    #[test]
    fn test_singular_time_field() {
        let entries = vec![TimelineEntry::Timed(TimedEntry {
            times: Vec::new(),
            time: Some("2019".to_owned()),
            text: "talk".to_owned(),
        })];
        let groups = group_and_sort(&entries);
        assert_eq!(labels(&groups), vec!["2019"]);
    }

    // flatten_and_sort

    #[test]
    fn test_flatten_keeps_one_pair_per_label_instance() {
        let entries = vec![
            timed(&["2020"], "a"),
            timed(&["2020"], "b"),
            timed(&["2021"], "c"),
        ];
        let pairs = flatten_and_sort(&entries);
        assert_eq!(
            pairs,
            vec![
                ("2021".to_owned(), "c".to_owned()),
                ("2020".to_owned(), "a".to_owned()),
                ("2020".to_owned(), "b".to_owned()),
            ]
        );
    }

    #[test]
    fn test_flatten_fans_out_multi_label_entries() {
        let entries = vec![timed(&["2020", "2022"], "X"), timed(&["2021"], "Y")];
        let pairs = flatten_and_sort(&entries);
        assert_eq!(
            pairs,
            vec![
                ("2022".to_owned(), "X".to_owned()),
                ("2021".to_owned(), "Y".to_owned()),
                ("2020".to_owned(), "X".to_owned()),
            ]
        );
    }

    // rendering

    #[test]
    fn test_render_grouped_markup() {
        let groups = vec![TimelineGroup {
            label: "2023".to_owned(),
            bodies: vec!["<b>body</b>".to_owned()],
        }];
        let html = render_grouped(&groups);
        assert_eq!(
            html,
            r#"<li class="group"><div class="time-list"><span class="time">2023</span></div><div class="item-body"><ul class="item-list"><li><b>body</b></li></ul></div></li>"#
        );
    }

    #[test]
    fn test_render_grouped_omits_empty_label_marker() {
        let groups = vec![TimelineGroup {
            label: String::new(),
            bodies: vec!["body".to_owned()],
        }];
        let html = render_grouped(&groups);
        assert!(html.contains(r#"<div class="time-list"></div>"#));
        assert!(!html.contains("span class=\"time\""));
    }

    #[test]
    fn test_render_flat_markup() {
        let pairs = vec![("2023".to_owned(), "body".to_owned())];
        let html = render_flat(&pairs);
        assert_eq!(
            html,
            r#"<li class="mobile-item"><span class="time">2023</span><div class="mobile-item-body">body</div></li>"#
        );
    }

    #[test]
    fn test_render_escapes_labels() {
        let pairs = vec![("<2023>".to_owned(), "body".to_owned())];
        let html = render_flat(&pairs);
        assert!(html.contains("&lt;2023&gt;"));
    }
}
